use repfit_detect::Tuning;
use repfit_detect::exercises::shuttle_run::{
    GOOD_PACE, PICK_UP_PACE, ShuttleRunDetector, ShuttleZones, Side,
};
use repfit_pose::{FramePose, Keypoint, KeypointName};

/// Frame with the hip midpoint at horizontal position `x`.
fn runner_frame(x: f32, ts: u64) -> FramePose {
    FramePose::empty(ts)
        .with(KeypointName::LeftHip, Keypoint::new(x - 10.0, 240.0, 0.9))
        .with(KeypointName::RightHip, Keypoint::new(x + 10.0, 240.0, 0.9))
}

fn raw_detector() -> ShuttleRunDetector {
    ShuttleRunDetector::new(Tuning::default().with_window_len(1))
}

// --- Counting ---

#[test]
fn test_first_zone_entry_arms_without_counting() {
    let mut d = raw_detector();
    let r = d.detect(&runner_frame(100.0, 0));
    assert_eq!(r.total_reps, 0);
    assert_eq!(d.current_side(), Some(Side::Left));
}

#[test]
fn test_each_crossing_counts_one_rep() {
    let mut d = raw_detector();
    d.detect(&runner_frame(100.0, 0)); // arm in left zone
    d.detect(&runner_frame(320.0, 1000)); // dead zone
    let right = d.detect(&runner_frame(520.0, 2000)); // reversal 1
    d.detect(&runner_frame(320.0, 3000));
    let left = d.detect(&runner_frame(90.0, 4000)); // reversal 2

    assert_eq!(right.reps_this_tick, 1);
    assert_eq!(right.total_reps, 1);
    assert_eq!(left.reps_this_tick, 1);
    assert_eq!(left.total_reps, 2);
}

#[test]
fn test_lingering_in_zone_counts_once() {
    let mut d = raw_detector();
    d.detect(&runner_frame(100.0, 0));
    for i in 1..8 {
        d.detect(&runner_frame(500.0 + i as f32, i * 1000));
    }
    assert_eq!(d.total_reps(), 1);
}

#[test]
fn test_dead_zone_wandering_never_counts() {
    let mut d = raw_detector();
    d.detect(&runner_frame(100.0, 0));
    // Back and forth between the markers without reaching either zone.
    let mut ts = 1000;
    for x in [200.0, 450.0, 250.0, 400.0, 300.0] {
        let r = d.detect(&runner_frame(x, ts));
        assert_eq!(r.total_reps, 0);
        ts += 1000;
    }
    assert_eq!(d.current_side(), Some(Side::Left));
}

// --- Pace scoring ---

#[test]
fn test_fast_crossing_scores_full() {
    let mut d = raw_detector();
    d.detect(&runner_frame(100.0, 0));
    d.detect(&runner_frame(320.0, 1000));
    let r = d.detect(&runner_frame(520.0, 2000));

    assert_eq!(r.form_score, 100);
    assert_eq!(r.feedback.as_deref(), Some(GOOD_PACE));
}

#[test]
fn test_slow_crossing_says_pick_up_pace() {
    let mut d = raw_detector();
    d.detect(&runner_frame(100.0, 0));
    // Ten ticks dawdling through the dead zone.
    for i in 1..=10 {
        d.detect(&runner_frame(170.0 + i as f32 * 30.0, i * 1000));
    }
    let r = d.detect(&runner_frame(520.0, 11_000));

    assert_eq!(r.total_reps, 1);
    assert!(r.form_score < 100);
    assert_eq!(r.feedback.as_deref(), Some(PICK_UP_PACE));
}

// --- Zones and resilience ---

#[test]
fn test_custom_zones() {
    let zones = ShuttleZones::default()
        .with_left_max_x(50.0)
        .with_right_min_x(250.0);
    let mut d = ShuttleRunDetector::with_zones(Tuning::default().with_window_len(1), zones);

    d.detect(&runner_frame(40.0, 0));
    let r = d.detect(&runner_frame(260.0, 1000));
    assert_eq!(r.total_reps, 1);
}

#[test]
fn test_single_reliable_hip_still_tracks() {
    let mut d = raw_detector();
    let frame = FramePose::empty(0)
        .with(KeypointName::LeftHip, Keypoint::new(100.0, 240.0, 0.9))
        .with(KeypointName::RightHip, Keypoint::new(120.0, 240.0, 0.1));

    d.detect(&frame);
    assert_eq!(d.current_side(), Some(Side::Left));
}

#[test]
fn test_no_hips_is_no_signal() {
    let mut d = raw_detector();
    d.detect(&runner_frame(100.0, 0));
    let r = d.detect(&FramePose::empty(1000));
    assert_eq!(r.reps_this_tick, 0);
    assert_eq!(r.total_reps, 0);
    assert_eq!(d.current_side(), Some(Side::Left));
}
