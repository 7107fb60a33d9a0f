//! Error types for notification delivery.

/// Errors from a notifier backend.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("recipient address is empty")]
    MissingRecipient,
    #[error("relay request failed: {0}")]
    Transport(String),
    #[error("relay rejected notification with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
