use serde::Serialize;
use serde_json::{Map, Value};

/// Key under which the stream's session id is merged into completion payloads
pub const SESSION_ID_KEY: &str = "sessionId";

/// Completion payload handed to `on_done`.
///
/// The server owns the shape of its `done` payload, so the fields are kept
/// as an opaque JSON object. The stream's session id is merged in under
/// `sessionId`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct DoneEvent {
    fields: Map<String, Value>,
}

impl DoneEvent {
    /// Build the completion payload from a `done` event's raw data.
    ///
    /// A payload that is not a JSON object contributes no fields. A session
    /// id known to the stream overwrites any `sessionId` the server sent;
    /// without one, the server's value is kept, or `null` is recorded.
    pub fn from_raw(raw_data: &str, session_id: Option<&str>) -> Self {
        let mut fields = match serde_json::from_str::<Value>(raw_data) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                tracing::debug!(payload = %other, "Done payload is not a JSON object; ignoring its fields");
                Map::new()
            }
            Err(e) => {
                if !raw_data.trim().is_empty() {
                    tracing::debug!(error = %e, "Done payload is not valid JSON; ignoring its fields");
                }
                Map::new()
            }
        };

        match session_id {
            Some(id) => {
                fields.insert(SESSION_ID_KEY.to_string(), Value::String(id.to_string()));
            }
            None => {
                fields.entry(SESSION_ID_KEY.to_string()).or_insert(Value::Null);
            }
        }

        Self { fields }
    }

    /// All fields, including `sessionId`.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn session_id(&self) -> Option<&str> {
        self.fields.get(SESSION_ID_KEY).and_then(Value::as_str)
    }

    /// Id of the stored conversation, used for feedback and bookmarks.
    pub fn conversation_id(&self) -> Option<i64> {
        self.fields.get("conversationId").and_then(Value::as_i64)
    }

    /// Question category the server detected.
    pub fn category(&self) -> Option<&str> {
        self.fields.get("category").and_then(Value::as_str)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}
