//! Handler set that records deliveries for later assertions.

use std::sync::{Arc, Mutex};

use qachat::{ChatStreamItem, StreamHandlers};

#[derive(Debug, Clone, Default)]
pub struct Recorder {
    items: Arc<Mutex<Vec<ChatStreamItem>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handlers that push every delivery onto this recorder.
    pub fn handlers(&self) -> StreamHandlers {
        let on_message = self.items.clone();
        let on_done = self.items.clone();
        let on_error = self.items.clone();
        StreamHandlers::new()
            .with_on_message(move |fragment, session_id| {
                on_message.lock().unwrap().push(ChatStreamItem::Message {
                    fragment: fragment.to_string(),
                    session_id: session_id.map(str::to_string),
                })
            })
            .with_on_done(move |done| on_done.lock().unwrap().push(ChatStreamItem::Done(done)))
            .with_on_error(move |message| {
                on_error
                    .lock()
                    .unwrap()
                    .push(ChatStreamItem::Error(message.to_string()))
            })
    }

    pub fn items(&self) -> Vec<ChatStreamItem> {
        self.items.lock().unwrap().clone()
    }

    /// Concatenated message fragments.
    pub fn text(&self) -> String {
        self.items()
            .into_iter()
            .filter_map(|item| match item {
                ChatStreamItem::Message { fragment, .. } => Some(fragment),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.items()
            .into_iter()
            .filter_map(|item| match item {
                ChatStreamItem::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Number of terminal deliveries (`on_done` plus `on_error`).
    pub fn terminal_count(&self) -> usize {
        self.items().iter().filter(|item| item.is_terminal()).count()
    }
}
