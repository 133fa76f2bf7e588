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
pub const SIT_UP_FULLY: &str = "Sit all the way up for a full rep";

/// Torso angle below this counts as crunched up.
const CRUNCH_THRESHOLD: f32 = 80.0;
/// Torso angle above this counts as lying back down; counts the rep.
const LYING_THRESHOLD: f32 = 140.0;
/// Full crunch credit at or below this top angle.
const IDEAL_CRUNCH: f32 = 55.0;

/// Sit-up repetition counter.
///
/// Same hysteresis template as the push-up with a different joint set:
/// the signal is the smoothed shoulder-hip-knee angle, which closes as
/// the torso curls toward the knees. The cycle starts lying flat; the rep
/// is counted on the return to lying, so a crunch that is held forever is
/// never counted.
#[derive(Debug, Clone)]
pub struct SitUpDetector {
    tuning: Tuning,
    window: SlidingWindow,
    cycle: RepCycle,
    debounce: FeedbackDebouncer,
    confidence: ConfidenceMeter,
    total_reps: u32,
    form_score: u8,
    /// Minimum smoothed torso angle seen during the current crunch.
    top_angle: Option<f32>,
}

impl SitUpDetector {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            window: SlidingWindow::new(tuning.window_len()),
            cycle: RepCycle::away_below(CRUNCH_THRESHOLD, LYING_THRESHOLD),
            debounce: FeedbackDebouncer::new(tuning.debounce_ms()),
            confidence: ConfidenceMeter::new(),
            total_reps: 0,
            form_score: 0,
            top_angle: None,
        }
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.cycle.reset();
        self.debounce.reset();
        self.confidence.reset();
        self.total_reps = 0;
        self.form_score = 0;
        self.top_angle = None;
    }

    pub fn total_reps(&self) -> u32 {
        self.total_reps
    }

    pub fn phase(&self) -> CyclePhase {
        self.cycle.phase()
    }

    pub fn detect(&mut self, frame: &FramePose) -> DetectionResult {
        let now_ms = frame.timestamp_ms();

        let Some((torso_angle, signal_score)) = self.torso_angle(frame) else {
            return DetectionResult {
                reps_this_tick: 0,
                total_reps: self.total_reps,
                form_score: self.form_score,
                feedback: None,
                confidence: self.confidence.miss(),
                timestamp_ms: now_ms,
            };
        };

        let smoothed = self.window.push(torso_angle);
        let confidence = self.confidence.observe(signal_score);

        let event = self.cycle.update(smoothed);
        if self.cycle.phase() == CyclePhase::Away {
            self.top_angle = Some(match self.top_angle {
                Some(prev) => prev.min(smoothed),
                None => smoothed,
            });
        }

        let mut reps_this_tick = 0;
        let mut feedback = None;

        match event {
            CycleEvent::WentAway => {
                debug!("situp crunched at {:.1} deg (smoothed)", smoothed);
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
                    "situp rep {} complete, top {:.1} deg, form {}",
                    self.total_reps,
                    self.top_angle.unwrap_or(CRUNCH_THRESHOLD),
                    score
                );

                self.top_angle = None;
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

    /// Shoulder-hip-knee angle averaged across the reliable sides.
    fn torso_angle(&self, frame: &FramePose) -> Option<(f32, f32)> {
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

        let mut angle_sum = 0.0;
        let mut score_sum = 0.0;
        let mut count = 0;
        for (shoulder, hip, knee) in sides {
            if let Some((angle, score)) = joint_angle(frame, shoulder, hip, knee, threshold) {
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

    fn score_rep(&self) -> (u8, &'static str) {
        let top = self.top_angle.unwrap_or(CRUNCH_THRESHOLD);

        // Full credit at 55°, sliding penalty up to the 80° entry angle.
        let depth_penalty = ((top - IDEAL_CRUNCH).max(0.0) * 1.2).min(30.0);
        let score = (100.0 - depth_penalty).clamp(60.0, 100.0) as u8;

        let message = if depth_penalty > 5.0 {
            SIT_UP_FULLY
        } else {
            GOOD_FORM
        };

        (score, message)
    }
}
