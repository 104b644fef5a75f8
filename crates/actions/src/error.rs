use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("blocked potentially dangerous command: {0}")]
    Blocked(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("operation timed out")]
    Timeout,

    #[error("operation failed: {0}")]
    OperationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
