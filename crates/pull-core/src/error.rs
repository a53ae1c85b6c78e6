use thiserror::Error;

/// Git could not be started against the repository; no process ran.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LocalInvocationFailure {
    #[error("path does not exist or is not a directory: {0}")]
    PathMissing(String),
    #[error("tool not found: {0}")]
    ToolNotFound(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("failed to start process: {0}")]
    Spawn(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("repository already added: {0}")]
    Duplicate(String),
    #[error("repository not in list: {0}")]
    NotFound(String),
    #[error("index {index} out of range for {len} repositories")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("store io: {0}")]
    Io(#[from] std::io::Error),
    #[error("store format: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Eq, PartialEq, Error)]
pub enum BatchError {
    #[error("{paths} paths but {indices} destination indices")]
    LengthMismatch { paths: usize, indices: usize },
}
