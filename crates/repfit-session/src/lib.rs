//! Caller-side plumbing around the detection core: a fixed-cadence tick
//! runner over an async pose source, and session aggregation into a
//! workout summary.
//!
//! The detector itself stays synchronous; everything that blocks
//! (capturing a frame, running pose inference) lives behind the
//! `PoseSource` boundary and is awaited to completion before the next
//! tick is scheduled, so ticks for one session never overlap.

pub mod aggregator;
pub mod runner;
pub mod source;

pub use aggregator::{
    BodyProfile, CalorieEstimator, DefaultCalorieEstimator, WorkoutAggregator, WorkoutSummary,
};
pub use runner::{RunnerConfig, WorkoutRunner};
pub use source::{PoseSource, SourceError};
