use repfit_base::log::debug;
use repfit_pose::FramePose;
use std::collections::HashMap;

use crate::error::DetectError;
use crate::exercises::{ExerciseDetector, ExerciseKind};
use crate::result::DetectionResult;
use crate::tuning::Tuning;

/// Per-session detector state, keyed by session id.
///
/// One value object per session, looked up by id and mutated once per
/// tick; no state is shared between sessions. The registry is not
/// internally synchronized: callers must serialize ticks per session
/// (the `&mut self` receivers enforce this at the type level for a
/// single registry).
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, ExerciseDetector>,
    tuning: Tuning,
    strict: bool,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Strict mode: `detect` on a never-reset session fails with
    /// `UnknownSession` instead of auto-initializing.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Create the session or clear it back to its initial state.
    /// Idempotent: calling twice in a row equals calling once.
    pub fn reset(&mut self, session_id: &str, kind: ExerciseKind) {
        match self.sessions.get_mut(session_id) {
            Some(detector) if detector.kind() == kind => detector.reset(),
            _ => {
                debug!("session {} starts {}", session_id, kind);
                self.sessions.insert(
                    session_id.to_string(),
                    ExerciseDetector::new(kind, self.tuning),
                );
            }
        }
    }

    /// Run one detection tick for the session.
    ///
    /// Unknown sessions auto-initialize as `kind` by default; in strict
    /// mode they fail instead. For an existing session `kind` is
    /// ignored: the exercise was fixed when the session was created.
    pub fn detect(
        &mut self,
        session_id: &str,
        kind: ExerciseKind,
        frame: &FramePose,
    ) -> Result<DetectionResult, DetectError> {
        if self.strict && !self.sessions.contains_key(session_id) {
            return Err(DetectError::UnknownSession(session_id.to_string()));
        }

        let tuning = self.tuning;
        let detector = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                debug!("session {} auto-initialized as {}", session_id, kind);
                ExerciseDetector::new(kind, tuning)
            });
        Ok(detector.detect(frame))
    }

    /// Discard the session's state. Returns whether it existed.
    pub fn end(&mut self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
