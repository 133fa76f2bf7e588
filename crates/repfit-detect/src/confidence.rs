/// Per-missed-tick decay factor. Ten consecutive no-signal ticks bring a
/// perfect confidence down to ~0.03.
const DECAY_PER_MISS: f32 = 0.7;

/// Tracks detection confidence across ticks.
///
/// Ticks with a usable signal report the mean score of the keypoints that
/// fed the metric. Each consecutive tick without signal decays the
/// reported value geometrically toward 0 so the caller can warn the user,
/// without this ever becoming an error or touching the rep count.
#[derive(Debug, Clone)]
pub struct ConfidenceMeter {
    last_observed: f32,
    miss_streak: u32,
}

impl ConfidenceMeter {
    pub fn new() -> Self {
        Self {
            last_observed: 0.0,
            miss_streak: 0,
        }
    }

    /// A tick with a usable signal; `score` is the mean keypoint score.
    pub fn observe(&mut self, score: f32) -> f32 {
        self.last_observed = score.clamp(0.0, 1.0);
        self.miss_streak = 0;
        self.last_observed
    }

    /// A tick with no usable signal.
    pub fn miss(&mut self) -> f32 {
        self.miss_streak = self.miss_streak.saturating_add(1);
        self.last_observed * DECAY_PER_MISS.powi(self.miss_streak.min(30) as i32)
    }

    /// Consecutive no-signal ticks since the last observation.
    pub fn miss_streak(&self) -> u32 {
        self.miss_streak
    }

    pub fn reset(&mut self) {
        self.last_observed = 0.0;
        self.miss_streak = 0;
    }
}

impl Default for ConfidenceMeter {
    fn default() -> Self {
        Self::new()
    }
}
