//! SSE (Server-Sent Events) stream decoding
//!
//! Decodes the AI chat stream. SSE format consists of:
//! - `event: <type>` - event type line
//! - `data: <payload>` - data payload line
//! - Empty line - signals end of event
//! - Lines starting with `:` - comments (ignored)
//!
//! # Module structure
//! - `events` - Frame and event types (SseFrame, SseEvent, EventKind, SseLine)
//! - `framer` - Byte buffering and blank-line framing (SseFramer)
//! - `parser` - Frame decoding (decode_frame, parse_sse_line)
//! - `correlator` - Session id tracking (SessionCorrelator)
//! - `payloads` - Internal payload deserialization structs

mod correlator;
mod events;
mod framer;
mod parser;
mod payloads;

// Re-export public types
pub use correlator::SessionCorrelator;
pub use events::{EventKind, SseEvent, SseFrame, SseLine};
pub use framer::SseFramer;
pub use parser::{decode_frame, parse_sse_line, EventDecoder};

pub(crate) use payloads::ErrorPayload;
