//! Session correlation for a single stream.

use crate::sse::events::{EventKind, SseEvent};
use crate::sse::payloads::SessionPayload;

/// Remembers the session id announced by the stream and stamps it onto
/// every event that passes through.
#[derive(Debug, Default, Clone)]
pub struct SessionCorrelator {
    session_id: Option<String>,
}

impl SessionCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update correlation from `event` and return it carrying the best-known id.
    ///
    /// A `session` event whose payload yields no id leaves the stored id
    /// untouched; correlation degrades, the stream goes on.
    pub fn observe(&mut self, event: SseEvent) -> SseEvent {
        if event.kind == EventKind::Session {
            match SessionPayload::extract_id(&event.raw_data) {
                Some(id) => {
                    tracing::debug!(session_id = %id, "Stream session established");
                    self.session_id = Some(id);
                }
                None => {
                    tracing::debug!(
                        payload = %event.raw_data,
                        "Session event without a usable id; keeping previous correlation"
                    );
                }
            }
        }

        let session_id = self.session_id.clone();
        event.with_session_id(session_id)
    }

    /// The session id currently attached to events.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }
}
