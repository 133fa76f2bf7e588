use repfit_base::log::{debug, info};
use repfit_pose::{FramePose, KeypointName};

use crate::confidence::ConfidenceMeter;
use crate::feedback::FeedbackDebouncer;
use crate::result::DetectionResult;
use crate::smoothing::SlidingWindow;
use crate::tuning::Tuning;

pub const GOOD_PACE: &str = "Good pace!";
pub const PICK_UP_PACE: &str = "Pick up the pace between markers";

/// Crossings at or under this many ticks earn full pace credit.
const FULL_CREDIT_TICKS: u32 = 4;

/// The two marker zones, in source-image pixel coordinates.
///
/// The runner turns inside a zone; the span between the zones is the
/// dead zone that holds the current side, so jitter at a zone edge
/// cannot double-count a turn. Defaults assume a 640-wide frame with
/// markers in the outer quarters.
#[derive(Debug, Clone, Copy)]
pub struct ShuttleZones {
    left_max_x: f32,
    right_min_x: f32,
}

impl Default for ShuttleZones {
    fn default() -> Self {
        Self {
            left_max_x: 160.0,
            right_min_x: 480.0,
        }
    }
}

impl ShuttleZones {
    /// Set the right edge of the left marker zone.
    pub fn with_left_max_x(mut self, x: f32) -> Self {
        self.left_max_x = x;
        self
    }

    /// Set the left edge of the right marker zone.
    pub fn with_right_min_x(mut self, x: f32) -> Self {
        self.right_min_x = x;
        self
    }

    pub fn left_max_x(&self) -> f32 {
        self.left_max_x
    }

    pub fn right_min_x(&self) -> f32 {
        self.right_min_x
    }

    fn side_of(&self, x: f32) -> Option<Side> {
        if x < self.left_max_x {
            Some(Side::Left)
        } else if x > self.right_min_x {
            Some(Side::Right)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Shuttle-run lap counter.
///
/// The signal is the smoothed horizontal position of the hip midpoint.
/// Each completed crossing into the opposite marker zone is one
/// direction reversal and counts one rep; the first zone the runner is
/// seen in only arms the counter. Form reflects pace: the fewer ticks a
/// crossing takes, the higher the score.
#[derive(Debug, Clone)]
pub struct ShuttleRunDetector {
    tuning: Tuning,
    zones: ShuttleZones,
    window: SlidingWindow,
    debounce: FeedbackDebouncer,
    confidence: ConfidenceMeter,
    total_reps: u32,
    form_score: u8,
    /// Zone the runner last turned in; `None` until first seen in one.
    current_side: Option<Side>,
    /// Reliable ticks since the last reversal.
    ticks_since_turn: u32,
}

impl ShuttleRunDetector {
    pub fn new(tuning: Tuning) -> Self {
        Self::with_zones(tuning, ShuttleZones::default())
    }

    pub fn with_zones(tuning: Tuning, zones: ShuttleZones) -> Self {
        Self {
            tuning,
            zones,
            window: SlidingWindow::new(tuning.window_len()),
            debounce: FeedbackDebouncer::new(tuning.debounce_ms()),
            confidence: ConfidenceMeter::new(),
            total_reps: 0,
            form_score: 0,
            current_side: None,
            ticks_since_turn: 0,
        }
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.debounce.reset();
        self.confidence.reset();
        self.total_reps = 0;
        self.form_score = 0;
        self.current_side = None;
        self.ticks_since_turn = 0;
    }

    pub fn total_reps(&self) -> u32 {
        self.total_reps
    }

    pub fn current_side(&self) -> Option<Side> {
        self.current_side
    }

    pub fn detect(&mut self, frame: &FramePose) -> DetectionResult {
        let now_ms = frame.timestamp_ms();

        let Some((center_x, signal_score)) = self.hip_center_x(frame) else {
            return DetectionResult {
                reps_this_tick: 0,
                total_reps: self.total_reps,
                form_score: self.form_score,
                feedback: None,
                confidence: self.confidence.miss(),
                timestamp_ms: now_ms,
            };
        };

        let smoothed = self.window.push(center_x);
        let confidence = self.confidence.observe(signal_score);
        self.ticks_since_turn = self.ticks_since_turn.saturating_add(1);

        let mut reps_this_tick = 0;
        let mut feedback = None;

        match (self.current_side, self.zones.side_of(smoothed)) {
            (None, Some(side)) => {
                // First zone entry arms the counter, no rep yet.
                debug!("shuttle run armed in {:?} zone at x={:.0}", side, smoothed);
                self.current_side = Some(side);
                self.ticks_since_turn = 0;
            }
            (Some(prev), Some(side)) if side != prev => {
                self.total_reps += 1;
                reps_this_tick = 1;

                let (score, message) = self.score_crossing();
                self.form_score = score;
                feedback = self
                    .debounce
                    .offer(message, now_ms)
                    .map(|text| text.to_string());

                info!(
                    "shuttle run rep {} complete, crossed to {:?} in {} ticks, form {}",
                    self.total_reps, side, self.ticks_since_turn, score
                );

                self.current_side = Some(side);
                self.ticks_since_turn = 0;
            }
            // Same zone or the dead zone between the markers: hold.
            _ => {}
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

    /// Horizontal position of the hip midpoint, from whichever hips are
    /// reliable this tick.
    fn hip_center_x(&self, frame: &FramePose) -> Option<(f32, f32)> {
        let threshold = self.tuning.reliability_threshold();
        let left = frame.reliable(KeypointName::LeftHip, threshold);
        let right = frame.reliable(KeypointName::RightHip, threshold);

        match (left, right) {
            (Some(l), Some(r)) => Some((
                l.position.midpoint(r.position).x,
                (l.score + r.score) / 2.0,
            )),
            (Some(l), None) => Some((l.position.x, l.score)),
            (None, Some(r)) => Some((r.position.x, r.score)),
            (None, None) => None,
        }
    }

    fn score_crossing(&self) -> (u8, &'static str) {
        let extra_ticks = self.ticks_since_turn.saturating_sub(FULL_CREDIT_TICKS);
        let pace_penalty = (extra_ticks as f32 * 5.0).min(40.0);

        let score = (100.0 - pace_penalty).clamp(60.0, 100.0) as u8;
        let message = if pace_penalty > 10.0 {
            PICK_UP_PACE
        } else {
            GOOD_PACE
        };

        (score, message)
    }
}
