//! Request and completion models for the streaming chat endpoint.

mod done;
mod request;

pub use done::{DoneEvent, SESSION_ID_KEY};
pub use request::{ChatRequest, MessageType};
