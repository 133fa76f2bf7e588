use repfit_base::log::{debug, info};
use repfit_pose::{FramePose, KeypointName};

use super::joint_angle;
use crate::confidence::ConfidenceMeter;
use crate::cycle::{CycleEvent, CyclePhase, RepCycle};
use crate::feedback::FeedbackDebouncer;
use crate::result::DetectionResult;
use crate::smoothing::SlidingWindow;
use crate::tuning::Tuning;

pub use crate::feedback::GOOD_FORM;
pub const GO_LOWER: &str = "Go lower for a full rep";
pub const BACK_STRAIGHT: &str = "Keep your back straight";

/// Elbow angle below this enters the DOWN phase.
const DOWN_THRESHOLD: f32 = 90.0;
/// Elbow angle above this returns to UP and counts the rep.
const UP_THRESHOLD: f32 = 160.0;
/// Full depth credit at or below this bottom angle.
const IDEAL_BOTTOM: f32 = 70.0;
/// Torso may deviate this far from a straight line without penalty.
const TORSO_TOLERANCE: f32 = 15.0;

/// Push-up repetition counter and form scorer.
///
/// Signal: smoothed elbow angle (shoulder-elbow-wrist), averaged across
/// both arms when both are reliable, else the single reliable arm. A rep
/// is one complete DOWN-then-UP cycle, counted on the return to UP so a
/// descent that never comes back up is never counted. Form grades how
/// deep the bottom of the completed rep went toward 70° and whether the
/// shoulder-hip-knee line stayed straight during the DOWN phase.
#[derive(Debug, Clone)]
pub struct PushUpDetector {
    tuning: Tuning,
    window: SlidingWindow,
    cycle: RepCycle,
    debounce: FeedbackDebouncer,
    confidence: ConfidenceMeter,
    total_reps: u32,
    form_score: u8,
    /// Minimum smoothed elbow angle seen during the current DOWN phase.
    bottom_angle: Option<f32>,
    /// Worst straight-line deviation of the torso during the current DOWN
    /// phase, degrees.
    worst_torso_dev: f32,
}

impl PushUpDetector {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            window: SlidingWindow::new(tuning.window_len()),
            cycle: RepCycle::away_below(DOWN_THRESHOLD, UP_THRESHOLD),
            debounce: FeedbackDebouncer::new(tuning.debounce_ms()),
            confidence: ConfidenceMeter::new(),
            total_reps: 0,
            form_score: 0,
            bottom_angle: None,
            worst_torso_dev: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.cycle.reset();
        self.debounce.reset();
        self.confidence.reset();
        self.total_reps = 0;
        self.form_score = 0;
        self.bottom_angle = None;
        self.worst_torso_dev = 0.0;
    }

    pub fn total_reps(&self) -> u32 {
        self.total_reps
    }

    pub fn phase(&self) -> CyclePhase {
        self.cycle.phase()
    }

    pub fn detect(&mut self, frame: &FramePose) -> DetectionResult {
        let now_ms = frame.timestamp_ms();

        let Some((elbow_angle, signal_score)) = self.elbow_angle(frame) else {
            // No reliable arm this tick: no new signal, carry state.
            return DetectionResult {
                reps_this_tick: 0,
                total_reps: self.total_reps,
                form_score: self.form_score,
                feedback: None,
                confidence: self.confidence.miss(),
                timestamp_ms: now_ms,
            };
        };

        let smoothed = self.window.push(elbow_angle);
        let confidence = self.confidence.observe(signal_score);

        let event = self.cycle.update(smoothed);
        if self.cycle.phase() == CyclePhase::Away {
            self.track_down_phase(frame, smoothed);
        }

        let mut reps_this_tick = 0;
        let mut feedback = None;

        match event {
            CycleEvent::WentAway => {
                debug!("pushup entered DOWN at {:.1} deg (smoothed)", smoothed);
            }
            CycleEvent::Completed => {
                self.total_reps += 1;
                reps_this_tick = 1;

                let (score, message) = self.score_rep();
                self.form_score = score;
                feedback = self
                    .debounce
                    .offer(message, now_ms)
                    .map(|text| text.to_string());

                info!(
                    "pushup rep {} complete, bottom {:.1} deg, form {}",
                    self.total_reps,
                    self.bottom_angle.unwrap_or(DOWN_THRESHOLD),
                    score
                );

                self.bottom_angle = None;
                self.worst_torso_dev = 0.0;
            }
            CycleEvent::Hold => {}
        }

        DetectionResult {
            reps_this_tick,
            total_reps: self.total_reps,
            form_score: self.form_score,
            feedback,
            confidence,
            timestamp_ms: now_ms,
        }
    }

    /// Elbow angle averaged across the reliable arms, with the mean
    /// keypoint score. `None` when neither arm is fully reliable.
    fn elbow_angle(&self, frame: &FramePose) -> Option<(f32, f32)> {
        let threshold = self.tuning.reliability_threshold();
        let arms = [
            (
                KeypointName::LeftShoulder,
                KeypointName::LeftElbow,
                KeypointName::LeftWrist,
            ),
            (
                KeypointName::RightShoulder,
                KeypointName::RightElbow,
                KeypointName::RightWrist,
            ),
        ];

        let mut angle_sum = 0.0;
        let mut score_sum = 0.0;
        let mut count = 0;
        for (shoulder, elbow, wrist) in arms {
            if let Some((angle, score)) = joint_angle(frame, shoulder, elbow, wrist, threshold) {
                angle_sum += angle;
                score_sum += score;
                count += 1;
            }
        }

        if count == 0 {
            return None;
        }
        Some((angle_sum / count as f32, score_sum / count as f32))
    }

    /// Accumulate bottom depth and torso straightness while DOWN.
    fn track_down_phase(&mut self, frame: &FramePose, smoothed: f32) {
        self.bottom_angle = Some(match self.bottom_angle {
            Some(prev) => prev.min(smoothed),
            None => smoothed,
        });

        if let Some(deviation) = self.torso_deviation(frame) {
            self.worst_torso_dev = self.worst_torso_dev.max(deviation);
        }
    }

    /// Deviation of the shoulder-hip-knee line from straight (180°),
    /// averaged over the reliable sides.
    fn torso_deviation(&self, frame: &FramePose) -> Option<f32> {
        let threshold = self.tuning.reliability_threshold();
        let sides = [
            (
                KeypointName::LeftShoulder,
                KeypointName::LeftHip,
                KeypointName::LeftKnee,
            ),
            (
                KeypointName::RightShoulder,
                KeypointName::RightHip,
                KeypointName::RightKnee,
            ),
        ];

        let mut dev_sum = 0.0;
        let mut count = 0;
        for (shoulder, hip, knee) in sides {
            if let Some((angle, _)) = joint_angle(frame, shoulder, hip, knee, threshold) {
                dev_sum += 180.0 - angle;
                count += 1;
            }
        }

        if count == 0 {
            return None;
        }
        Some(dev_sum / count as f32)
    }

    /// Score the rep just completed and pick the feedback line for the
    /// rule it most violated.
    fn score_rep(&self) -> (u8, &'static str) {
        // Entering DOWN guarantees a bottom angle below the threshold.
        let bottom = self.bottom_angle.unwrap_or(DOWN_THRESHOLD);

        // Full credit at 70°, sliding penalty up to the 90° entry angle.
        let depth_penalty = ((bottom - IDEAL_BOTTOM).max(0.0) * 1.5).min(30.0);
        let torso_penalty = (self.worst_torso_dev - TORSO_TOLERANCE).max(0.0).min(20.0);

        let score = (100.0 - depth_penalty - torso_penalty).clamp(60.0, 100.0) as u8;

        let message = if torso_penalty > 0.0 && torso_penalty >= depth_penalty {
            BACK_STRAIGHT
        } else if depth_penalty > 5.0 {
            GO_LOWER
        } else {
            GOOD_FORM
        };

        (score, message)
    }
}
