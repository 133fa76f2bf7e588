use crate::aggregator::{WorkoutAggregator, WorkoutSummary};
use crate::source::PoseSource;
use repfit_base::log;
use repfit_detect::{DetectionResult, ExerciseDetector, ExerciseKind, Tuning};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// Runner timing knobs.
#[derive(Debug, Clone, Copy)]
pub struct RunnerConfig {
    period: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
        }
    }
}

impl RunnerConfig {
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

/// Drives one workout session at a fixed cadence.
///
/// Each tick awaits the next pose from the source, runs detection, and
/// folds the result into the aggregator. Source failures are logged and
/// the tick is skipped; the session keeps running until the stop signal
/// flips or the channel closes.
pub struct WorkoutRunner {
    detector: ExerciseDetector,
    aggregator: WorkoutAggregator,
    config: RunnerConfig,
}

impl WorkoutRunner {
    pub fn new(kind: ExerciseKind, tuning: Tuning, aggregator: WorkoutAggregator) -> Self {
        Self {
            detector: ExerciseDetector::new(kind, tuning),
            aggregator,
            config: RunnerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Run until `stop` becomes true or its sender drops, then return
    /// the session summary.
    pub async fn run<S: PoseSource>(
        mut self,
        mut source: S,
        mut stop: watch::Receiver<bool>,
    ) -> WorkoutSummary {
        let mut interval = tokio::time::interval(self.config.period);
        // A late tick must not trigger a burst of catch-up detections.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match source.next_pose().await {
                        Ok(frame) => {
                            let result = self.tick(&frame);
                            log::debug!(
                                "{}: reps {} form {} confidence {:.2}",
                                self.detector.kind(),
                                result.total_reps,
                                result.form_score,
                                result.confidence,
                            );
                        },
                        Err(error) => {
                            log::warn!("{}: skipping tick: {}", self.detector.kind(), error);
                        },
                    }
                },
                changed = stop.changed() => {
                    match changed {
                        Ok(()) if !*stop.borrow_and_update() => { },
                        _ => break,
                    }
                },
            }
        }

        self.aggregator.summary()
    }

    fn tick(&mut self, frame: &repfit_pose::FramePose) -> DetectionResult {
        let result = self.detector.detect(frame);
        self.aggregator.observe(&result);
        result
    }
}
