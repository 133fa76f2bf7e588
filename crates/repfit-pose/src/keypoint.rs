use repfit_base::Vec2;
use serde::{Deserialize, Serialize};

/// Number of keypoints in the COCO pose vocabulary
pub const KEYPOINT_COUNT: usize = 17;

/// A keypoint is usable for angle computation only above this score.
pub const DEFAULT_RELIABILITY_THRESHOLD: f32 = 0.3;

/// Named anatomical landmarks in COCO order, as produced by the pose model.
///
/// The serde names match the pose model's wire vocabulary
/// (`left_shoulder`, `right_elbow`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeypointName {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl From<KeypointName> for usize {
    fn from(name: KeypointName) -> usize {
        name as usize
    }
}

impl TryFrom<usize> for KeypointName {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(KeypointName::Nose),
            1 => Ok(KeypointName::LeftEye),
            2 => Ok(KeypointName::RightEye),
            3 => Ok(KeypointName::LeftEar),
            4 => Ok(KeypointName::RightEar),
            5 => Ok(KeypointName::LeftShoulder),
            6 => Ok(KeypointName::RightShoulder),
            7 => Ok(KeypointName::LeftElbow),
            8 => Ok(KeypointName::RightElbow),
            9 => Ok(KeypointName::LeftWrist),
            10 => Ok(KeypointName::RightWrist),
            11 => Ok(KeypointName::LeftHip),
            12 => Ok(KeypointName::RightHip),
            13 => Ok(KeypointName::LeftKnee),
            14 => Ok(KeypointName::RightKnee),
            15 => Ok(KeypointName::LeftAnkle),
            16 => Ok(KeypointName::RightAnkle),
            _ => Err(format!(
                "Invalid keypoint index: {}. Must be in range 0-16.",
                value
            )),
        }
    }
}

/// A single keypoint with 2D position and confidence score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    /// Position in source-image pixel coordinates.
    pub position: Vec2,
    /// Confidence score in [0.0, 1.0].
    pub score: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, score: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            score,
        }
    }

    /// Usable for angle computation only above the given score threshold.
    ///
    /// An unreliable keypoint must not feed an angle; the consumer treats
    /// the tick as "no new signal" for that metric instead.
    pub fn is_reliable(&self, threshold: f32) -> bool {
        self.score > threshold
    }
}
