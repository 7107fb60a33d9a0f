//! Error types for the conversation layer.

/// Errors raised before a message reaches the orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
}

/// Failures at the completion-endpoint boundary.
///
/// The orchestrator treats every variant the same way; the split only
/// exists so logs say what went wrong.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("completion endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LlmError::MalformedResponse(err.to_string())
        } else {
            LlmError::Transport(err.to_string())
        }
    }
}
