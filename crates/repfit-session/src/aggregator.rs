use repfit_detect::DetectionResult;
use serde::{Deserialize, Serialize};

/// How many recent feedback lines the summary keeps, newest first.
const FEEDBACK_HISTORY: usize = 5;

/// Reps past this earn the workout achievement.
const ACHIEVEMENT_REPS: u32 = 10;

/// The body metrics calorie estimation needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    weight_kg: f32,
    height_cm: f32,
}

impl Default for BodyProfile {
    fn default() -> Self {
        Self {
            weight_kg: 70.0,
            height_cm: 175.0,
        }
    }
}

impl BodyProfile {
    pub fn with_weight_kg(mut self, weight_kg: f32) -> Self {
        self.weight_kg = weight_kg;
        self
    }

    pub fn with_height_cm(mut self, height_cm: f32) -> Self {
        self.height_cm = height_cm;
        self
    }

    pub fn weight_kg(&self) -> f32 {
        self.weight_kg
    }

    pub fn height_cm(&self) -> f32 {
        self.height_cm
    }
}

/// Calorie-burn model, pluggable per deployment.
///
/// There is no authoritative formula for camera-only workouts; the
/// default below is a crude time-and-weight scaling, and callers with a
/// better model (heart rate, MET tables) supply their own.
pub trait CalorieEstimator {
    fn estimate(&self, duration_secs: u64, profile: &BodyProfile) -> f32;
}

/// `duration * 0.1 * weight / 70`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCalorieEstimator;

impl CalorieEstimator for DefaultCalorieEstimator {
    fn estimate(&self, duration_secs: u64, profile: &BodyProfile) -> f32 {
        duration_secs as f32 * 0.1 * (profile.weight_kg() / 70.0)
    }
}

/// End-of-workout totals handed back to the application layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    pub total_reps: u32,
    #[serde(rename = "duration")]
    pub duration_secs: u64,
    pub calories_burned: f32,
    pub average_form_score: u8,
    pub achievements: Vec<String>,
}

/// Accumulates per-tick detection results into session totals.
///
/// Duration comes from frame timestamps, not the wall clock, so the
/// aggregate stays a pure function of the result stream.
pub struct WorkoutAggregator {
    profile: BodyProfile,
    estimator: Box<dyn CalorieEstimator + Send>,
    first_ts_ms: Option<u64>,
    last_ts_ms: u64,
    total_reps: u32,
    form_sum: u64,
    form_ticks: u32,
    feedback: Vec<String>,
}

impl WorkoutAggregator {
    pub fn new(profile: BodyProfile) -> Self {
        Self::with_estimator(profile, Box::new(DefaultCalorieEstimator))
    }

    pub fn with_estimator(profile: BodyProfile, estimator: Box<dyn CalorieEstimator + Send>) -> Self {
        Self {
            profile,
            estimator,
            first_ts_ms: None,
            last_ts_ms: 0,
            total_reps: 0,
            form_sum: 0,
            form_ticks: 0,
            feedback: Vec::new(),
        }
    }

    /// Fold one detection result into the running totals.
    pub fn observe(&mut self, result: &DetectionResult) {
        if self.first_ts_ms.is_none() {
            self.first_ts_ms = Some(result.timestamp_ms);
        }
        self.last_ts_ms = self.last_ts_ms.max(result.timestamp_ms);

        self.total_reps = result.total_reps;

        // Zero means "no rep scored yet": not a data point.
        if result.form_score > 0 {
            self.form_sum += u64::from(result.form_score);
            self.form_ticks += 1;
        }

        if let Some(text) = &result.feedback {
            self.feedback.insert(0, text.clone());
            self.feedback.truncate(FEEDBACK_HISTORY);
        }
    }

    /// Elapsed workout time derived from frame timestamps, seconds.
    pub fn duration_secs(&self) -> u64 {
        match self.first_ts_ms {
            Some(first) => self.last_ts_ms.saturating_sub(first) / 1000,
            None => 0,
        }
    }

    /// Recent feedback lines, newest first.
    pub fn feedback(&self) -> &[String] {
        &self.feedback
    }

    pub fn total_reps(&self) -> u32 {
        self.total_reps
    }

    pub fn summary(&self) -> WorkoutSummary {
        let duration_secs = self.duration_secs();
        let average_form_score = if self.form_ticks > 0 {
            (self.form_sum / u64::from(self.form_ticks)) as u8
        } else {
            0
        };

        let mut achievements = Vec::new();
        if self.total_reps > ACHIEVEMENT_REPS {
            achievements.push("Great workout!".to_string());
        }

        WorkoutSummary {
            total_reps: self.total_reps,
            duration_secs,
            calories_burned: self.estimator.estimate(duration_secs, &self.profile),
            average_form_score,
            achievements,
        }
    }
}
