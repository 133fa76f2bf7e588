/// The one feedback line every exercise shares; the per-exercise
/// correction lines live with their state machines.
pub const GOOD_FORM: &str = "Good form!";

/// Suppresses repeated emission of the same feedback text within a
/// minimum time window.
///
/// Time comes from frame capture timestamps, not the wall clock, so the
/// core stays a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct FeedbackDebouncer {
    window_ms: u64,
    last_text: Option<&'static str>,
    last_emitted_ms: u64,
}

impl FeedbackDebouncer {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_text: None,
            last_emitted_ms: 0,
        }
    }

    /// Offer a feedback line for emission at `now_ms`.
    ///
    /// Returns the text if it may be shown, or `None` when the identical
    /// text already fired within the window. Different text always passes
    /// and restarts the window.
    pub fn offer(&mut self, text: &'static str, now_ms: u64) -> Option<&'static str> {
        if self.last_text == Some(text) && now_ms.saturating_sub(self.last_emitted_ms) < self.window_ms
        {
            return None;
        }
        self.last_text = Some(text);
        self.last_emitted_ms = now_ms;
        Some(text)
    }

    pub fn reset(&mut self) {
        self.last_text = None;
        self.last_emitted_ms = 0;
    }
}
