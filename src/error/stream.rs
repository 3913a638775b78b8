//! Streaming-related error types.
//!
//! This module defines the failures that end a chat stream without a
//! completion event: transport problems, backend-reported errors, and
//! protocol violations.

use std::fmt;

use crate::traits::HttpError;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// The stream could not be opened.
    ConnectionFailed {
        message: String,
    },

    /// The connection dropped while the stream was being read.
    ConnectionLost {
        message: String,
    },

    /// The server answered the stream request with a non-success status.
    ServerError {
        status: u16,
        message: String,
    },

    /// Backend reported an error via an `error` event.
    BackendError {
        message: String,
    },

    /// The stream closed without a `done` or `error` event.
    EndedUnexpectedly,

    /// The request was cancelled before the stream opened.
    Cancelled,
}

impl StreamError {
    /// Check if this error is likely transient and can be retried.
    ///
    /// Retrying is the caller's decision; this is only a hint.
    pub fn is_retryable(&self) -> bool {
        match self {
            StreamError::ConnectionFailed { .. }
            | StreamError::ConnectionLost { .. }
            | StreamError::EndedUnexpectedly => true,
            StreamError::ServerError { status, .. } => *status >= 500 || *status == 429,
            StreamError::BackendError { .. } | StreamError::Cancelled => false,
        }
    }

    /// Get the message reported to the caller's error handler.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::ConnectionFailed { .. } => "AI service connection failed".to_string(),
            StreamError::ConnectionLost { .. } => "AI service connection lost".to_string(),
            StreamError::ServerError { status, .. } => match *status {
                401 | 403 => "Not authorized to use the AI service".to_string(),
                429 => "AI service is busy, please try again later".to_string(),
                _ => format!("AI service returned HTTP {}", status),
            },
            StreamError::BackendError { message } => message.clone(),
            StreamError::EndedUnexpectedly => "stream ended unexpectedly".to_string(),
            StreamError::Cancelled => "request cancelled".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ConnectionFailed { .. } => "E_STREAM_CONN",
            StreamError::ConnectionLost { .. } => "E_STREAM_LOST",
            StreamError::ServerError { .. } => "E_STREAM_HTTP",
            StreamError::BackendError { .. } => "E_STREAM_BACKEND",
            StreamError::EndedUnexpectedly => "E_STREAM_EOF",
            StreamError::Cancelled => "E_STREAM_CANCEL",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::ConnectionFailed { message } => {
                write!(f, "Stream connection failed: {}", message)
            }
            StreamError::ConnectionLost { message } => {
                write!(f, "Stream connection lost: {}", message)
            }
            StreamError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            StreamError::BackendError { message } => {
                write!(f, "Backend error: {}", message)
            }
            StreamError::EndedUnexpectedly => {
                write!(f, "Stream ended without a completion event")
            }
            StreamError::Cancelled => write!(f, "Stream cancelled"),
        }
    }
}

impl std::error::Error for StreamError {}

impl From<HttpError> for StreamError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ServerError { status, message } => {
                StreamError::ServerError { status, message }
            }
            HttpError::Io(message) => StreamError::ConnectionLost { message },
            HttpError::Cancelled => StreamError::Cancelled,
            other => StreamError::ConnectionFailed {
                message: other.to_string(),
            },
        }
    }
}
