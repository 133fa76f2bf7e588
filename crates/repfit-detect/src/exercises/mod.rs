use repfit_pose::{FramePose, KeypointName, angle_at};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod jumping_jack;
pub mod pushup;
pub mod shuttle_run;
pub mod situp;

pub use jumping_jack::JumpingJackDetector;
pub use pushup::PushUpDetector;
pub use shuttle_run::{ShuttleRunDetector, ShuttleZones};
pub use situp::SitUpDetector;

use crate::result::DetectionResult;
use crate::tuning::Tuning;

/// The closed set of supported exercises.
///
/// The serde names are the catalog ids the application layer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseKind {
    #[serde(rename = "pushups")]
    PushUp,
    #[serde(rename = "situps")]
    SitUp,
    #[serde(rename = "jumping-jacks")]
    JumpingJack,
    #[serde(rename = "shuttle-run")]
    ShuttleRun,
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExerciseKind::PushUp => "pushups",
            ExerciseKind::SitUp => "situps",
            ExerciseKind::JumpingJack => "jumping-jacks",
            ExerciseKind::ShuttleRun => "shuttle-run",
        };
        write!(f, "{name}")
    }
}

/// Tagged-variant dispatch over the exercise detectors.
///
/// New exercises are added as variants behind the same contract, not as
/// an open inheritance hierarchy.
#[derive(Debug, Clone)]
pub enum ExerciseDetector {
    PushUp(PushUpDetector),
    SitUp(SitUpDetector),
    JumpingJack(JumpingJackDetector),
    ShuttleRun(ShuttleRunDetector),
}

impl ExerciseDetector {
    pub fn new(kind: ExerciseKind, tuning: Tuning) -> Self {
        match kind {
            ExerciseKind::PushUp => Self::PushUp(PushUpDetector::new(tuning)),
            ExerciseKind::SitUp => Self::SitUp(SitUpDetector::new(tuning)),
            ExerciseKind::JumpingJack => Self::JumpingJack(JumpingJackDetector::new(tuning)),
            ExerciseKind::ShuttleRun => Self::ShuttleRun(ShuttleRunDetector::new(tuning)),
        }
    }

    pub fn kind(&self) -> ExerciseKind {
        match self {
            Self::PushUp(_) => ExerciseKind::PushUp,
            Self::SitUp(_) => ExerciseKind::SitUp,
            Self::JumpingJack(_) => ExerciseKind::JumpingJack,
            Self::ShuttleRun(_) => ExerciseKind::ShuttleRun,
        }
    }

    /// Clear all session state back to the initial phase and zero reps.
    /// Idempotent: resetting twice equals resetting once.
    pub fn reset(&mut self) {
        match self {
            Self::PushUp(d) => d.reset(),
            Self::SitUp(d) => d.reset(),
            Self::JumpingJack(d) => d.reset(),
            Self::ShuttleRun(d) => d.reset(),
        }
    }

    /// Consume one keypoint frame. Never fails: frames with missing or
    /// low-confidence keypoints produce a zero-rep result with carried
    /// form score and no feedback.
    pub fn detect(&mut self, frame: &FramePose) -> DetectionResult {
        match self {
            Self::PushUp(d) => d.detect(frame),
            Self::SitUp(d) => d.detect(frame),
            Self::JumpingJack(d) => d.detect(frame),
            Self::ShuttleRun(d) => d.detect(frame),
        }
    }
}

/// Joint angle at `b` from the triple `(a, b, c)`, with the mean score of
/// the three keypoints.
///
/// `None` when any keypoint is missing or unreliable, or when the
/// geometry degenerates (coincident keypoints); both mean "no new signal
/// for this metric this tick" and are absorbed here, never propagated.
pub(crate) fn joint_angle(
    frame: &FramePose,
    a: KeypointName,
    b: KeypointName,
    c: KeypointName,
    threshold: f32,
) -> Option<(f32, f32)> {
    let ka = frame.reliable(a, threshold)?;
    let kb = frame.reliable(b, threshold)?;
    let kc = frame.reliable(c, threshold)?;

    let angle = angle_at(ka.position, kb.position, kc.position).ok()?;
    let score = (ka.score + kb.score + kc.score) / 3.0;
    Some((angle, score))
}
