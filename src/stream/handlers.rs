//! Delivery targets for dispatched events.

use std::collections::VecDeque;
use std::fmt;

use crate::models::DoneEvent;

/// Receives the caller-visible events of one stream, in arrival order.
///
/// Implementations run synchronously inside dispatch and must not block on
/// I/O; the dispatcher does not read the next chunk until they return.
pub trait EventSink {
    /// An incremental fragment of the answer text.
    fn on_message(&mut self, fragment: &str, session_id: Option<&str>);

    /// The stream completed; `done` already carries the session id.
    fn on_done(&mut self, done: DoneEvent);

    /// The stream failed; `message` is suitable for display.
    fn on_error(&mut self, message: &str);
}

pub type MessageHandler = Box<dyn FnMut(&str, Option<&str>) + Send>;
pub type DoneHandler = Box<dyn FnMut(DoneEvent) + Send>;
pub type ErrorHandler = Box<dyn FnMut(&str) + Send>;

/// Three optional callback slots; unset slots are skipped.
///
/// # Example
///
/// ```ignore
/// let handlers = StreamHandlers::new()
///     .with_on_message(|fragment, _session| print!("{}", fragment))
///     .with_on_done(|done| println!("\n[conversation {:?}]", done.conversation_id()))
///     .with_on_error(|message| eprintln!("error: {}", message));
/// ```
#[derive(Default)]
pub struct StreamHandlers {
    on_message: Option<MessageHandler>,
    on_done: Option<DoneHandler>,
    on_error: Option<ErrorHandler>,
}

impl StreamHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_on_message<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&str, Option<&str>) + Send + 'static,
    {
        self.on_message = Some(Box::new(handler));
        self
    }

    pub fn with_on_done<F>(mut self, handler: F) -> Self
    where
        F: FnMut(DoneEvent) + Send + 'static,
    {
        self.on_done = Some(Box::new(handler));
        self
    }

    pub fn with_on_error<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.on_error = Some(Box::new(handler));
        self
    }
}

impl fmt::Debug for StreamHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandlers")
            .field("on_message", &self.on_message.is_some())
            .field("on_done", &self.on_done.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

impl EventSink for StreamHandlers {
    fn on_message(&mut self, fragment: &str, session_id: Option<&str>) {
        if let Some(handler) = self.on_message.as_mut() {
            handler(fragment, session_id);
        }
    }

    fn on_done(&mut self, done: DoneEvent) {
        if let Some(handler) = self.on_done.as_mut() {
            handler(done);
        }
    }

    fn on_error(&mut self, message: &str) {
        if let Some(handler) = self.on_error.as_mut() {
            handler(message);
        }
    }
}

/// A caller-visible event, for pull-style consumption.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatStreamItem {
    Message {
        fragment: String,
        session_id: Option<String>,
    },
    Done(DoneEvent),
    Error(String),
}

impl ChatStreamItem {
    /// True for the items that end a stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChatStreamItem::Done(_) | ChatStreamItem::Error(_))
    }
}

/// Queues events so they can be pulled one at a time.
impl EventSink for VecDeque<ChatStreamItem> {
    fn on_message(&mut self, fragment: &str, session_id: Option<&str>) {
        self.push_back(ChatStreamItem::Message {
            fragment: fragment.to_string(),
            session_id: session_id.map(str::to_string),
        });
    }

    fn on_done(&mut self, done: DoneEvent) {
        self.push_back(ChatStreamItem::Done(done));
    }

    fn on_error(&mut self, message: &str) {
        self.push_back(ChatStreamItem::Error(message.to_string()));
    }
}
