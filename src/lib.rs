//! qachat - streaming client for an AI Q&A chat service
//!
//! The service answers over Server-Sent Events. This crate frames the raw
//! byte stream, decodes `session`/`message`/`done`/`error` events, tags them
//! with the session id and hands them to caller callbacks or a pull stream.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod sse;
pub mod stream;
pub mod traits;

pub use client::ChatClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, StreamError};
pub use models::{ChatRequest, DoneEvent, MessageType};
pub use stream::{CancelHandle, ChatStreamItem, StreamHandlers, StreamOutcome};
