use crate::error::StreamError;

/// Why a stream stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminationReason {
    /// A `done` event arrived
    Completed,
    /// An `error` event arrived; holds the message given to `on_error`
    BackendError(String),
    /// The transport failed before or during the stream
    TransportFailed(StreamError),
    /// The transport ended without a `done` or `error` event
    EndedWithoutCompletion,
    /// The caller cancelled; no handler was invoked for it
    Cancelled,
}

impl TerminationReason {
    /// The failure behind this termination, if it was one.
    pub fn as_error(&self) -> Option<StreamError> {
        match self {
            TerminationReason::Completed | TerminationReason::Cancelled => None,
            TerminationReason::BackendError(message) => Some(StreamError::BackendError {
                message: message.clone(),
            }),
            TerminationReason::TransportFailed(err) => Some(err.clone()),
            TerminationReason::EndedWithoutCompletion => Some(StreamError::EndedUnexpectedly),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationReason::Completed => "completed",
            TerminationReason::BackendError(_) => "backend_error",
            TerminationReason::TransportFailed(_) => "transport_failed",
            TerminationReason::EndedWithoutCompletion => "ended_without_completion",
            TerminationReason::Cancelled => "cancelled",
        }
    }
}

/// Summary of a terminated stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamOutcome {
    pub reason: TerminationReason,
    /// Session id known when the stream terminated
    pub session_id: Option<String>,
    /// Number of `message` fragments handed to the sink
    pub messages_delivered: usize,
}

impl StreamOutcome {
    pub fn is_completed(&self) -> bool {
        self.reason == TerminationReason::Completed
    }

    pub fn is_cancelled(&self) -> bool {
        self.reason == TerminationReason::Cancelled
    }

    pub fn error(&self) -> Option<StreamError> {
        self.reason.as_error()
    }
}
