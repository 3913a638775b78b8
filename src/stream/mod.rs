//! Stream dispatch: turns transport chunks into caller-visible events.
//!
//! # Module structure
//! - `dispatcher` - Per-stream state machine (StreamDispatcher)
//! - `handlers` - Delivery targets (EventSink, StreamHandlers, ChatStreamItem)
//! - `cancel` - Caller-side cancellation (CancelHandle)
//! - `outcome` - Termination summary (StreamOutcome, TerminationReason)
//! - `pull` - Pull-style event stream over a byte stream

mod cancel;
mod dispatcher;
mod handlers;
mod outcome;
mod pull;

pub use cancel::CancelHandle;
pub use dispatcher::{StreamDispatcher, GENERIC_ERROR_MESSAGE};
pub use handlers::{
    ChatStreamItem, DoneHandler, ErrorHandler, EventSink, MessageHandler, StreamHandlers,
};
pub use outcome::{StreamOutcome, TerminationReason};
pub use pull::{chat_events, ChatEventStream};
