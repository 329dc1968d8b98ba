//! Error types for IPC operations.

/// Errors that can occur while encoding or decoding protocol messages.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("Failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode message: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid message format: {0}")]
    InvalidFormat(String),
}

impl IpcError {
    /// Stable code reported to the UI in `SculptToUi::Error`.
    pub fn code(&self) -> &'static str {
        match self {
            IpcError::Encode(_) => "encode_failed",
            IpcError::Decode(_) | IpcError::InvalidFormat(_) => "invalid_message",
        }
    }
}
