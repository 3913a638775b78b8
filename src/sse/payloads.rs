//! SSE payload deserialization structs
//!
//! Contains internal structs used to deserialize JSON data payloads of the
//! `session` and `error` events. The `done` payload stays an opaque map.

use serde_json::Value;

/// Session announcement: `{"sessionId": "..."}`, `session_id` accepted too
pub(crate) struct SessionPayload;

impl SessionPayload {
    /// Parse a `session` payload and pull out its id.
    ///
    /// `sessionId` wins when both spellings are present. Accepts string and
    /// numeric ids; anything else counts as missing.
    pub(crate) fn extract_id(data: &str) -> Option<String> {
        let payload: Value = serde_json::from_str(data).ok()?;
        let id = ["sessionId", "session_id"]
            .iter()
            .filter_map(|key| payload.get(*key))
            .find(|value| !value.is_null())?;
        match id {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Backend error: `{"error": "..."}`, with `message` accepted as well
pub(crate) struct ErrorPayload;

impl ErrorPayload {
    /// Parse an `error` payload and pull out its message.
    ///
    /// Only the two text fields are looked at; other fields may hold anything.
    pub(crate) fn extract_message(data: &str) -> Option<String> {
        let payload: Value = serde_json::from_str(data).ok()?;
        ["error", "message"]
            .iter()
            .filter_map(|key| payload.get(*key).and_then(Value::as_str))
            .find(|m| !m.trim().is_empty())
            .map(str::to_string)
    }
}
