//! Streaming exercise detection core.
//!
//! Consumes one keypoint frame per tick and turns continuous, noisy
//! joint-angle signals into discrete repetition counts, form scores and
//! debounced coaching feedback. Each exercise is a small hysteresis state
//! machine behind one shared contract; per-session state lives in a
//! `SessionRegistry` keyed by session id.
//!
//! The core is synchronous and never performs I/O. Missing or
//! low-confidence keypoints are never an error: the tick degrades the
//! reported confidence and carries prior state forward.

pub mod confidence;
pub mod cycle;
pub mod error;
pub mod exercises;
pub mod feedback;
pub mod registry;
pub mod result;
pub mod smoothing;
pub mod tuning;

pub use confidence::ConfidenceMeter;
pub use cycle::{CycleEvent, CyclePhase, RepCycle};
pub use error::DetectError;
pub use exercises::{ExerciseDetector, ExerciseKind};
pub use feedback::FeedbackDebouncer;
pub use registry::SessionRegistry;
pub use result::DetectionResult;
pub use smoothing::SlidingWindow;
pub use tuning::Tuning;
