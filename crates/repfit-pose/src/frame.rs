use crate::keypoint::{KEYPOINT_COUNT, Keypoint, KeypointName};
use serde::{Deserialize, Serialize};

/// All keypoints the pose model produced for one video frame.
///
/// Keypoints are keyed by name and unique per frame by construction (one
/// fixed slot per `KeypointName`). Zero keypoints is a valid frame: the
/// model saw no person. A `FramePose` only lives for one detection tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireFrame", into = "WireFrame")]
pub struct FramePose {
    slots: [Option<Keypoint>; KEYPOINT_COUNT],
    timestamp_ms: u64,
}

impl FramePose {
    /// An empty frame (no person detected) captured at `timestamp_ms`.
    pub fn empty(timestamp_ms: u64) -> Self {
        Self {
            slots: [None; KEYPOINT_COUNT],
            timestamp_ms,
        }
    }

    /// Insert or replace a keypoint. Last write wins for duplicate names.
    pub fn insert(&mut self, name: KeypointName, keypoint: Keypoint) {
        self.slots[usize::from(name)] = Some(keypoint);
    }

    /// Builder-style insert for test fixtures and adapters.
    pub fn with(mut self, name: KeypointName, keypoint: Keypoint) -> Self {
        self.insert(name, keypoint);
        self
    }

    pub fn get(&self, name: KeypointName) -> Option<&Keypoint> {
        self.slots[usize::from(name)].as_ref()
    }

    /// The keypoint, but only if its score clears the reliability threshold.
    pub fn reliable(&self, name: KeypointName, threshold: f32) -> Option<&Keypoint> {
        self.get(name).filter(|kp| kp.is_reliable(threshold))
    }

    /// Capture timestamp in milliseconds, as reported by the frame sampler.
    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    /// Number of keypoints present in this frame.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Iterate over present keypoints with their names.
    pub fn iter(&self) -> impl Iterator<Item = (KeypointName, &Keypoint)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| Some((KeypointName::try_from(i).ok()?, slot.as_ref()?)))
    }
}

/// Wire form of one keypoint: `{name, x, y, score}` as the pose model
/// emits it.
#[derive(Serialize, Deserialize)]
struct WireKeypoint {
    name: KeypointName,
    x: f32,
    y: f32,
    score: f32,
}

/// Wire form of a frame: flat keypoint list plus the capture timestamp.
#[derive(Serialize, Deserialize)]
struct WireFrame {
    keypoints: Vec<WireKeypoint>,
    timestamp_ms: u64,
}

impl From<WireFrame> for FramePose {
    fn from(wire: WireFrame) -> Self {
        let mut frame = FramePose::empty(wire.timestamp_ms);
        for kp in wire.keypoints {
            frame.insert(kp.name, Keypoint::new(kp.x, kp.y, kp.score));
        }
        frame
    }
}

impl From<FramePose> for WireFrame {
    fn from(frame: FramePose) -> Self {
        let keypoints = frame
            .iter()
            .map(|(name, kp)| WireKeypoint {
                name,
                x: kp.position.x,
                y: kp.position.y,
                score: kp.score,
            })
            .collect();
        WireFrame {
            keypoints,
            timestamp_ms: frame.timestamp_ms,
        }
    }
}
