//! Error types for the chat stream client.
//!
//! - [`StreamError`]: why a stream ended without completing
//!   (transport failure, backend error, truncated stream)
//! - [`ClientError`]: what can fail before a stream opens
//!   (invalid request, encoding, opening the connection)
//!
//! Decode-level anomalies (malformed frames, bad JSON payloads) never
//! become errors; they degrade locally inside the dispatcher.

mod client;
mod stream;

pub use client::{ClientError, ClientResult};
pub use stream::StreamError;
