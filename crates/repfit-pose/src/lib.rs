//! Pose-source data contract for the repfit ecosystem.
//!
//! This crate defines what the external pose-estimation model delivers per
//! video frame (named keypoints with 2D positions and confidence scores) and
//! the pure geometry used to derive joint angles from them.

pub mod frame;
pub mod geometry;
pub mod keypoint;

pub use frame::FramePose;
pub use geometry::{GeometryError, angle_at};
pub use keypoint::{DEFAULT_RELIABILITY_THRESHOLD, KEYPOINT_COUNT, Keypoint, KeypointName};
