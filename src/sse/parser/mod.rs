//! SSE frame decoding
//!
//! Turns one complete frame into a typed event. Payloads stay opaque here;
//! JSON is only interpreted downstream by whoever consumes the event kind.

use crate::sse::events::{EventKind, SseEvent, SseFrame, SseLine};

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        // Only the single conventional space goes; payload text is opaque
        let value = rest.strip_prefix(' ').unwrap_or(rest);
        return SseLine::Data(value.to_string());
    }

    // Unknown line format - treat as comment
    SseLine::Comment(line.to_string())
}

/// Decode a complete frame into an uncorrelated event.
///
/// The last `event:` line names the kind and the last `data:` line is the
/// payload. A frame without an `event:` line decodes to
/// `EventKind::Unknown("")`. Never fails: malformed frames simply decode to
/// something the dispatcher will ignore.
pub fn decode_frame(frame: &SseFrame) -> SseEvent {
    let mut event_type: Option<String> = None;
    let mut data: Option<String> = None;

    for line in frame.lines() {
        match parse_sse_line(line) {
            SseLine::Event(name) => event_type = Some(name),
            SseLine::Data(value) => data = Some(value),
            SseLine::Empty | SseLine::Comment(_) => {}
        }
    }

    let kind = match event_type {
        Some(name) => EventKind::from_name(&name),
        None => EventKind::Unknown(String::new()),
    };

    SseEvent::new(kind, data.unwrap_or_default())
}

/// Stateless frame decoder.
///
/// Exists so the dispatcher can hold its pipeline stages uniformly; all the
/// work happens in [`decode_frame`].
#[derive(Debug, Default, Clone, Copy)]
pub struct EventDecoder;

impl EventDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, frame: &SseFrame) -> SseEvent {
        decode_frame(frame)
    }
}
