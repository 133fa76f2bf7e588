use std::fmt;

/// Errors the detection core can surface to its caller.
///
/// Missing keypoints, low confidence and degenerate joint geometry are
/// not errors: they are absorbed into the per-tick result as degraded
/// confidence and unchanged state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    /// `detect` was called for a session that was never reset and the
    /// registry runs in strict mode (auto-initialization disabled).
    UnknownSession(String),
}

impl fmt::Display for DetectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectError::UnknownSession(id) => write!(f, "unknown session: {id}"),
        }
    }
}

impl std::error::Error for DetectError {}
