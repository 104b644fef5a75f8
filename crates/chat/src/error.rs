use thiserror::Error;

/// Everything the streaming client can surface. None of these are retried
/// automatically.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("backend URL and model must be configured")]
    MissingConfig,

    #[error("can't reach the backend at {0} - is it running?")]
    Unreachable(String),

    #[error("request timed out")]
    Timeout,

    #[error("backend returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("backend error: {0}")]
    Backend(String),

    #[error("model '{0}' is not installed")]
    ModelMissing(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl ChatError {
    pub(crate) fn from_reqwest(err: reqwest::Error, base_url: &str) -> Self {
        if err.is_timeout() {
            ChatError::Timeout
        } else if err.is_connect() {
            ChatError::Unreachable(base_url.to_string())
        } else {
            ChatError::Transport(err.to_string())
        }
    }
}
