use std::path::PathBuf;
use std::time::Duration;

/// Failures surfaced by the draft store and its ports.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("Draft not found: {0}")]
    DraftNotFound(String),

    #[error("Revision {revision_id} not found in draft {draft_id}")]
    RevisionNotFound {
        draft_id: String,
        revision_id: String,
    },

    #[error("Storage error at {path:?}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed draft record {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid draft record {path:?}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    #[error("Invalid draft id {0:?}")]
    InvalidId(String),

    #[error("Content generator failed: {0}")]
    Generator(String),

    #[error("Content generator produced no output")]
    EmptyOutput,

    #[error("Refinement cancelled")]
    Cancelled,

    #[error("Refinement timed out after {0:?}")]
    TimedOut(Duration),

    #[error("A refinement is already running for draft {0}")]
    RefineInFlight(String),
}

impl DraftError {
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DraftError::DraftNotFound(_) | DraftError::RevisionNotFound { .. }
        )
    }
}

pub type DraftResult<T> = Result<T, DraftError>;
