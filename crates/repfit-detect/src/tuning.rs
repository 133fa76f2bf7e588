use repfit_pose::DEFAULT_RELIABILITY_THRESHOLD;

/// Shared detector tuning, exercise-independent.
///
/// Per-exercise angle and spread thresholds live with their state
/// machines; this covers the knobs every detector shares.
#[derive(Clone, Copy, Debug)]
pub struct Tuning {
    reliability_threshold: f32,
    window_len: usize,
    debounce_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            reliability_threshold: DEFAULT_RELIABILITY_THRESHOLD,
            window_len: 5,
            debounce_ms: 3000,
        }
    }
}

impl Tuning {
    /// Set the minimum keypoint score for a sample to count as reliable.
    pub fn with_reliability_threshold(mut self, threshold: f32) -> Self {
        self.reliability_threshold = threshold;
        self
    }

    /// Set the number of reliable samples in the smoothing window.
    pub fn with_window_len(mut self, len: usize) -> Self {
        self.window_len = len;
        self
    }

    /// Set the feedback debounce window in milliseconds.
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    // Getters
    pub fn reliability_threshold(&self) -> f32 {
        self.reliability_threshold
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn debounce_ms(&self) -> u64 {
        self.debounce_ms
    }
}
