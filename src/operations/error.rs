// Sync Errors
// Failure kinds surfaced by the category API and the sync store

use thiserror::Error;

/// Errors from category synchronization
#[derive(Error, Debug)]
pub enum SyncError {
    /// The request could not be sent or timed out
    #[error("network failure: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("server responded with status {status}: {body}")]
    Server { status: u16, body: String },

    /// The response body was not valid JSON of the expected shape
    #[error("could not decode server response: {0}")]
    Decode(String),

    /// The operation referenced state that does not exist locally
    #[error("precondition violated: {0}")]
    PreconditionViolation(#[from] Precondition),
}

/// Which precondition an operation violated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    #[error("unknown category `{0}`")]
    UnknownCategory(String),

    #[error("widget id `{0}` is already in use")]
    DuplicateWidget(String),
}

/// Result type for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

impl SyncError {
    /// Short stable name of the error kind, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            SyncError::Network(_) => "network",
            SyncError::Server { .. } => "server",
            SyncError::Decode(_) => "decode",
            SyncError::PreconditionViolation(_) => "precondition",
        }
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, SyncError::PreconditionViolation(_))
    }
}
