use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What kind of message the user is sending; steers the assistant's prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    General,
    /// A course question that should be answered
    Question,
    /// Help with using the Q&A system itself
    Help,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::General => "general",
            MessageType::Question => "question",
            MessageType::Help => "help",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(MessageType::General),
            "question" => Ok(MessageType::Question),
            "help" => Ok(MessageType::Help),
            other => Err(format!(
                "unknown message type '{}' (expected general, question or help)",
                other
            )),
        }
    }
}

/// Request body for the streaming chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user's message; must not be blank
    pub message: String,
    /// Session to continue - None lets the server start a new one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Ask the server to attach learning resource recommendations
    #[serde(default)]
    pub need_recommendation: bool,
    #[serde(default)]
    pub message_type: MessageType,
}

impl ChatRequest {
    /// Create a request that starts a new session
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: None,
            need_recommendation: false,
            message_type: MessageType::General,
        }
    }

    /// Continue an existing session (multi-turn conversation)
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_recommendation(mut self, need_recommendation: bool) -> Self {
        self.need_recommendation = need_recommendation;
        self
    }

    pub fn with_message_type(mut self, message_type: MessageType) -> Self {
        self.message_type = message_type;
        self
    }

    /// Check the request before anything goes over the wire.
    pub fn validate(&self) -> Result<(), String> {
        if self.message.trim().is_empty() {
            return Err("message must not be blank".to_string());
        }
        if matches!(&self.session_id, Some(id) if id.trim().is_empty()) {
            return Err("session id must not be blank when provided".to_string());
        }
        Ok(())
    }
}
