use repfit_pose::FramePose;
use std::fmt;

/// Failure in the camera-to-keypoints pipeline behind the source.
///
/// The runner treats either case the same way: log, skip the tick, keep
/// the session alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    Capture(String),
    Inference(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Capture(msg) => write!(f, "frame capture failed: {msg}"),
            SourceError::Inference(msg) => write!(f, "pose inference failed: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Async source of keypoint frames.
///
/// One call per tick: the implementation captures a still frame from the
/// live video and runs the external pose model over it. A frame with
/// zero keypoints is a valid answer (no person in view), not an error.
#[allow(async_fn_in_trait)]
pub trait PoseSource {
    /// Produce the keypoint frame for the current tick.
    async fn next_pose(&mut self) -> Result<FramePose, SourceError>;
}
