//! Errors returned directly by the chat client.
//!
//! Everything that happens after a stream opens is reported through the
//! stream's handlers; these cover what goes wrong before that point.

use thiserror::Error;

use super::stream::StreamError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid chat request: {0}")]
    InvalidRequest(String),

    #[error("Failed to encode chat request: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl ClientError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::InvalidRequest(_) => "E_CLIENT_REQUEST",
            ClientError::Serialize(_) => "E_CLIENT_ENCODE",
            ClientError::Stream(err) => err.error_code(),
        }
    }
}

/// Type alias for Results using ClientError.
pub type ClientResult<T> = Result<T, ClientError>;
