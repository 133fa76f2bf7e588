use repfit_pose::{DEFAULT_RELIABILITY_THRESHOLD, FramePose, Keypoint, KeypointName};

// --- Construction and lookup ---

#[test]
fn test_empty_frame_has_no_keypoints() {
    let frame = FramePose::empty(1000);
    assert!(frame.is_empty());
    assert_eq!(frame.len(), 0);
    assert_eq!(frame.timestamp_ms(), 1000);
    assert!(frame.get(KeypointName::Nose).is_none());
}

#[test]
fn test_insert_and_get() {
    let frame = FramePose::empty(0).with(KeypointName::LeftElbow, Keypoint::new(10.0, 20.0, 0.9));

    let kp = frame.get(KeypointName::LeftElbow).unwrap();
    assert_eq!(kp.position.x, 10.0);
    assert_eq!(kp.position.y, 20.0);
    assert_eq!(kp.score, 0.9);
    assert_eq!(frame.len(), 1);
}

#[test]
fn test_duplicate_name_last_write_wins() {
    let frame = FramePose::empty(0)
        .with(KeypointName::Nose, Keypoint::new(1.0, 1.0, 0.5))
        .with(KeypointName::Nose, Keypoint::new(2.0, 2.0, 0.8));

    assert_eq!(frame.len(), 1);
    assert_eq!(frame.get(KeypointName::Nose).unwrap().position.x, 2.0);
}

// --- Reliability ---

#[test]
fn test_reliable_filters_low_scores() {
    let frame = FramePose::empty(0)
        .with(KeypointName::LeftWrist, Keypoint::new(0.0, 0.0, 0.2))
        .with(KeypointName::RightWrist, Keypoint::new(0.0, 0.0, 0.8));

    assert!(
        frame
            .reliable(KeypointName::LeftWrist, DEFAULT_RELIABILITY_THRESHOLD)
            .is_none()
    );
    assert!(
        frame
            .reliable(KeypointName::RightWrist, DEFAULT_RELIABILITY_THRESHOLD)
            .is_some()
    );
}

#[test]
fn test_reliability_threshold_is_exclusive() {
    // score must be strictly greater than the threshold
    let frame = FramePose::empty(0).with(KeypointName::LeftHip, Keypoint::new(0.0, 0.0, 0.3));
    assert!(
        frame
            .reliable(KeypointName::LeftHip, DEFAULT_RELIABILITY_THRESHOLD)
            .is_none()
    );
}

// --- Wire format ---

#[test]
fn test_deserialize_pose_model_output() {
    let json = r#"{
        "keypoints": [
            {"name": "left_shoulder", "x": 100.0, "y": 50.0, "score": 0.95},
            {"name": "left_elbow", "x": 110.0, "y": 90.0, "score": 0.91},
            {"name": "left_wrist", "x": 120.0, "y": 130.0, "score": 0.88}
        ],
        "timestamp_ms": 1234
    }"#;

    let frame: FramePose = serde_json::from_str(json).unwrap();
    assert_eq!(frame.len(), 3);
    assert_eq!(frame.timestamp_ms(), 1234);
    assert_eq!(
        frame.get(KeypointName::LeftElbow).unwrap().position.y,
        90.0
    );
}

#[test]
fn test_serialize_round_trip() {
    let frame = FramePose::empty(77)
        .with(KeypointName::RightKnee, Keypoint::new(5.0, 6.0, 0.7))
        .with(KeypointName::RightAnkle, Keypoint::new(5.0, 9.0, 0.6));

    let json = serde_json::to_string(&frame).unwrap();
    let back: FramePose = serde_json::from_str(&json).unwrap();
    assert_eq!(back, frame);
}

#[test]
fn test_keypoint_name_wire_vocabulary() {
    let name: KeypointName = serde_json::from_str("\"right_shoulder\"").unwrap();
    assert_eq!(name, KeypointName::RightShoulder);
    assert_eq!(
        serde_json::to_string(&KeypointName::LeftAnkle).unwrap(),
        "\"left_ankle\""
    );
}

#[test]
fn test_keypoint_name_index_mapping() {
    assert_eq!(usize::from(KeypointName::Nose), 0);
    assert_eq!(usize::from(KeypointName::LeftShoulder), 5);
    assert_eq!(usize::from(KeypointName::RightAnkle), 16);
    assert_eq!(KeypointName::try_from(11).unwrap(), KeypointName::LeftHip);
    assert!(KeypointName::try_from(17).is_err());
}
