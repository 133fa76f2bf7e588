use repfit_detect::{ExerciseKind, Tuning};
use repfit_pose::{FramePose, Keypoint, KeypointName};
use repfit_session::{
    BodyProfile, PoseSource, RunnerConfig, SourceError, WorkoutAggregator, WorkoutRunner,
};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::watch;

/// Frame with both arms at `elbow_deg`, torso straight, all scores 0.9.
fn pushup_frame(elbow_deg: f32, ts: u64) -> FramePose {
    let rad = elbow_deg.to_radians();
    let wrist = (100.0 * rad.sin(), 100.0 - 100.0 * rad.cos());

    let mut frame = FramePose::empty(ts);
    for (shoulder, elbow, wrist_name) in [
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
    ] {
        frame.insert(shoulder, Keypoint::new(0.0, 0.0, 0.9));
        frame.insert(elbow, Keypoint::new(0.0, 100.0, 0.9));
        frame.insert(wrist_name, Keypoint::new(wrist.0, wrist.1, 0.9));
    }
    for (hip, knee) in [
        (KeypointName::LeftHip, KeypointName::LeftKnee),
        (KeypointName::RightHip, KeypointName::RightKnee),
    ] {
        frame.insert(hip, Keypoint::new(100.0, 0.0, 0.9));
        frame.insert(knee, Keypoint::new(200.0, 0.0, 0.9));
    }
    frame
}

/// Replays a fixed script of ticks, then flips the stop signal.
struct ScriptedSource {
    script: VecDeque<Result<FramePose, SourceError>>,
    stop: watch::Sender<bool>,
}

impl ScriptedSource {
    fn new(script: Vec<Result<FramePose, SourceError>>, stop: watch::Sender<bool>) -> Self {
        Self {
            script: script.into(),
            stop,
        }
    }
}

impl PoseSource for ScriptedSource {
    async fn next_pose(&mut self) -> Result<FramePose, SourceError> {
        match self.script.pop_front() {
            Some(entry) => entry,
            None => {
                let _ = self.stop.send(true);
                Err(SourceError::Capture("end of script".to_string()))
            },
        }
    }
}

fn runner() -> WorkoutRunner {
    // Safe to call from every test; only the first install wins.
    repfit_base::init_stdout_logger();
    WorkoutRunner::new(
        ExerciseKind::PushUp,
        Tuning::default().with_window_len(1),
        WorkoutAggregator::new(BodyProfile::default()),
    )
    .with_config(RunnerConfig::default().with_period(Duration::from_secs(1)))
}

// --- Running to completion ---

#[tokio::test(start_paused = true)]
async fn test_runner_counts_scripted_reps() {
    let (tx, rx) = watch::channel(false);
    let script = [180.0, 70.0, 170.0, 70.0, 170.0]
        .iter()
        .enumerate()
        .map(|(i, deg)| Ok(pushup_frame(*deg, i as u64 * 1000)))
        .collect();
    let source = ScriptedSource::new(script, tx);

    let summary = runner().run(source, rx).await;

    assert_eq!(summary.total_reps, 2);
    assert_eq!(summary.duration_secs, 4);
    assert_eq!(summary.average_form_score, 100);
}

#[tokio::test(start_paused = true)]
async fn test_source_error_skips_tick_without_ending_session() {
    let (tx, rx) = watch::channel(false);
    let script = vec![
        Ok(pushup_frame(180.0, 0)),
        Ok(pushup_frame(70.0, 1000)),
        Err(SourceError::Inference("model timeout".to_string())),
        Ok(pushup_frame(170.0, 3000)),
    ];
    let source = ScriptedSource::new(script, tx);

    let summary = runner().run(source, rx).await;

    // The rep closes on the frame after the dropped tick.
    assert_eq!(summary.total_reps, 1);
    assert_eq!(summary.duration_secs, 3);
}

// --- Stopping ---

#[tokio::test(start_paused = true)]
async fn test_stop_before_first_tick_yields_empty_summary() {
    let (tx, rx) = watch::channel(false);
    let source = ScriptedSource::new(Vec::new(), tx.clone());

    tx.send(true).unwrap();
    let summary = runner().run(source, rx).await;

    assert_eq!(summary.total_reps, 0);
    assert_eq!(summary.duration_secs, 0);
}

#[tokio::test(start_paused = true)]
async fn test_sender_drop_stops_runner() {
    let (tx, rx) = watch::channel(false);
    // The source gets its own, never-flipped channel so only the drop
    // of `tx` can end the run.
    let (unused_tx, _unused_rx) = watch::channel(false);
    let script = (0..100u64).map(|i| Ok(pushup_frame(180.0, i * 1000))).collect();
    let source = ScriptedSource::new(script, unused_tx);

    let handle = tokio::spawn(runner().run(source, rx));
    tokio::time::sleep(Duration::from_millis(1500)).await;
    drop(tx);

    let summary = handle.await.unwrap();
    assert_eq!(summary.total_reps, 0);
}
