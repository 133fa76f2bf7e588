use repfit_base::log::{debug, info};
use repfit_pose::{FramePose, Keypoint, KeypointName};

use crate::confidence::ConfidenceMeter;
use crate::cycle::{CycleEvent, CyclePhase, RepCycle};
use crate::feedback::FeedbackDebouncer;
use crate::result::DetectionResult;
use crate::smoothing::SlidingWindow;
use crate::tuning::Tuning;

pub use crate::feedback::GOOD_FORM;
pub const RAISE_ARMS: &str = "Raise your arms fully overhead";
pub const FEET_WIDER: &str = "Jump your feet wider";

/// Spread signal above this enters the open phase.
const OPEN_THRESHOLD: f32 = 1.4;
/// Spread signal below this returns to closed and counts the rep.
const CLOSED_THRESHOLD: f32 = 0.7;
/// Full credit for foot spread at or above this fraction of torso height.
const IDEAL_ANKLE_SPREAD: f32 = 0.9;
/// Full credit for arm raise at or above this fraction of torso height.
const IDEAL_ARM_RAISE: f32 = 0.6;

/// Jumping-jack repetition counter.
///
/// The signal is limb spread normalized by torso height so it is
/// independent of how far the person stands from the camera: ankle
/// spread plus how far the wrists have risen above the shoulders, both
/// as fractions of the shoulder-to-hip distance. The cycle starts
/// closed (feet together, arms down) and the rep is counted on the
/// return to closed.
#[derive(Debug, Clone)]
pub struct JumpingJackDetector {
    tuning: Tuning,
    window: SlidingWindow,
    cycle: RepCycle,
    debounce: FeedbackDebouncer,
    confidence: ConfidenceMeter,
    total_reps: u32,
    form_score: u8,
    /// Widest ankle spread fraction seen during the current open phase.
    peak_ankle: f32,
    /// Highest arm raise fraction seen during the current open phase.
    peak_arm: f32,
}

/// Spread measurement for one frame.
struct Spread {
    signal: f32,
    ankle_fraction: f32,
    arm_fraction: f32,
    score: f32,
}

impl JumpingJackDetector {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            window: SlidingWindow::new(tuning.window_len()),
            cycle: RepCycle::away_above(OPEN_THRESHOLD, CLOSED_THRESHOLD),
            debounce: FeedbackDebouncer::new(tuning.debounce_ms()),
            confidence: ConfidenceMeter::new(),
            total_reps: 0,
            form_score: 0,
            peak_ankle: 0.0,
            peak_arm: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.cycle.reset();
        self.debounce.reset();
        self.confidence.reset();
        self.total_reps = 0;
        self.form_score = 0;
        self.peak_ankle = 0.0;
        self.peak_arm = 0.0;
    }

    pub fn total_reps(&self) -> u32 {
        self.total_reps
    }

    pub fn phase(&self) -> CyclePhase {
        self.cycle.phase()
    }

    pub fn detect(&mut self, frame: &FramePose) -> DetectionResult {
        let now_ms = frame.timestamp_ms();

        let Some(spread) = self.measure_spread(frame) else {
            return DetectionResult {
                reps_this_tick: 0,
                total_reps: self.total_reps,
                form_score: self.form_score,
                feedback: None,
                confidence: self.confidence.miss(),
                timestamp_ms: now_ms,
            };
        };

        let smoothed = self.window.push(spread.signal);
        let confidence = self.confidence.observe(spread.score);

        let event = self.cycle.update(smoothed);
        if self.cycle.phase() == CyclePhase::Away {
            self.peak_ankle = self.peak_ankle.max(spread.ankle_fraction);
            self.peak_arm = self.peak_arm.max(spread.arm_fraction);
        }

        let mut reps_this_tick = 0;
        let mut feedback = None;

        match event {
            CycleEvent::WentAway => {
                debug!("jumping jack opened at {:.2} spread (smoothed)", smoothed);
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
                    "jumping jack rep {} complete, peak ankle {:.2}, peak arm {:.2}, form {}",
                    self.total_reps, self.peak_ankle, self.peak_arm, score
                );

                self.peak_ankle = 0.0;
                self.peak_arm = 0.0;
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

    /// Limb spread normalized by torso height. Needs shoulders, hips,
    /// wrists and ankles all reliable; otherwise no signal this tick.
    fn measure_spread(&self, frame: &FramePose) -> Option<Spread> {
        let threshold = self.tuning.reliability_threshold();

        let joints = [
            KeypointName::LeftShoulder,
            KeypointName::RightShoulder,
            KeypointName::LeftHip,
            KeypointName::RightHip,
            KeypointName::LeftWrist,
            KeypointName::RightWrist,
            KeypointName::LeftAnkle,
            KeypointName::RightAnkle,
        ];
        let mut points: Vec<&Keypoint> = Vec::with_capacity(joints.len());
        for name in joints {
            points.push(frame.reliable(name, threshold)?);
        }
        let &[
            left_shoulder,
            right_shoulder,
            left_hip,
            right_hip,
            left_wrist,
            right_wrist,
            left_ankle,
            right_ankle,
        ] = &points[..]
        else {
            return None;
        };

        let shoulder_mid = left_shoulder.position.midpoint(right_shoulder.position);
        let hip_mid = left_hip.position.midpoint(right_hip.position);
        let torso_height = shoulder_mid.distance_to(hip_mid);
        if torso_height == 0.0 {
            // Coincident shoulders and hips; normalization degenerates.
            return None;
        }

        let ankle_fraction = left_ankle.position.distance_to(right_ankle.position) / torso_height;
        // y grows downward in image coordinates; wrists above the
        // shoulders give a positive raise.
        let wrist_mid = left_wrist.position.midpoint(right_wrist.position);
        let arm_fraction = ((shoulder_mid.y - wrist_mid.y) / torso_height).max(0.0);

        let score = points.iter().map(|kp| kp.score).sum::<f32>() / points.len() as f32;

        Some(Spread {
            signal: ankle_fraction + arm_fraction,
            ankle_fraction,
            arm_fraction,
            score,
        })
    }

    fn score_rep(&self) -> (u8, &'static str) {
        let ankle_penalty = ((IDEAL_ANKLE_SPREAD - self.peak_ankle).max(0.0) * 40.0).min(20.0);
        let arm_penalty = ((IDEAL_ARM_RAISE - self.peak_arm).max(0.0) * 50.0).min(30.0);

        let score = (100.0 - ankle_penalty - arm_penalty).clamp(60.0, 100.0) as u8;

        let message = if arm_penalty > 5.0 && arm_penalty >= ankle_penalty {
            RAISE_ARMS
        } else if ankle_penalty > 5.0 {
            FEET_WIDER
        } else {
            GOOD_FORM
        };

        (score, message)
    }
}
