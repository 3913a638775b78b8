//! SSE event types and definitions
//!
//! Contains the frame, line, and event types produced while decoding the
//! AI chat stream.

use std::fmt;

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Event type declaration (e.g., "event: message")
    Event(String),
    /// Data payload (e.g., "data: {\"sessionId\": \"abc\"}")
    Data(String),
    /// Empty line - signals end of event
    Empty,
    /// Comment line (starts with ':') or an unrecognized field
    Comment(String),
}

/// One complete SSE unit: the text between two blank-line delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    text: String,
}

impl SseFrame {
    /// Create a frame from its decoded text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The raw frame text, without the terminating blank line.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Iterate over the frame's lines with any trailing `\r` removed.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n').map(|line| line.trim_end_matches('\r'))
    }

    /// True when the frame holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Kinds of events the chat stream carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Announces the session id for the rest of the stream
    Session,
    /// Incremental answer text
    Message,
    /// Stream completed successfully
    Done,
    /// Backend reported an error
    Error,
    /// Anything else, including frames without an `event:` line.
    /// Holds the name as received (empty when absent).
    Unknown(String),
}

impl EventKind {
    /// Map an `event:` name to its kind.
    pub fn from_name(name: &str) -> Self {
        match name {
            "session" => EventKind::Session,
            "message" => EventKind::Message,
            "done" => EventKind::Done,
            "error" => EventKind::Error,
            other => EventKind::Unknown(other.to_string()),
        }
    }

    /// Returns the event type name as a string for debugging purposes.
    pub fn name(&self) -> &str {
        match self {
            EventKind::Session => "session",
            EventKind::Message => "message",
            EventKind::Done => "done",
            EventKind::Error => "error",
            EventKind::Unknown(name) => name,
        }
    }

    /// True for `done` and `error`, the kinds that end a stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventKind::Done | EventKind::Error)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Unknown(name) if name.is_empty() => write!(f, "<none>"),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// A decoded event, optionally correlated with the stream's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub kind: EventKind,
    /// Payload text as received; never parsed at the decoding layer
    pub raw_data: String,
    /// Session id known at the time this event was observed
    pub session_id: Option<String>,
}

impl SseEvent {
    /// Create an uncorrelated event.
    pub fn new(kind: EventKind, raw_data: impl Into<String>) -> Self {
        Self {
            kind,
            raw_data: raw_data.into(),
            session_id: None,
        }
    }

    /// Attach (or clear) the session id.
    pub fn with_session_id(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id;
        self
    }
}
