use serde::{Deserialize, Serialize};

/// Per-tick output of an exercise detector.
///
/// A plain value; the session aggregator copies what it needs. The wire
/// names match what the surrounding application layer expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Repetitions completed on this tick (0 or 1 in practice).
    pub reps_this_tick: u32,
    /// Total repetitions since the last reset. Never decreases.
    pub total_reps: u32,
    /// Form quality in [0, 100]. Carried forward on ticks with no signal.
    pub form_score: u8,
    /// Debounced coaching feedback, if any fired this tick.
    pub feedback: Option<String>,
    /// Detection confidence in [0, 1]. Decays under missing signal.
    pub confidence: f32,
    /// Capture timestamp of the frame this result was computed from.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: u64,
}
