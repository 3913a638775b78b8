//! Common test utilities for integration tests.
//!
//! Builders for SSE response bodies, a wiremock server serving the chat
//! endpoint, and a handler set that records everything it receives.
//!
//! # Example
//!
//! ```ignore
//! use common::{answer_body, mount_chat_stream, Recorder};
//!
//! let server = MockServer::start().await;
//! mount_chat_stream(&server, answer_body("s-1", &["Hi"])).await;
//! ```

#![allow(dead_code)]

pub mod recorder;

pub use recorder::Recorder;

use qachat::{ChatClient, ClientConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const STREAM_PATH: &str = "/api/ai/chat/stream";

/// Creates a test token.
pub fn test_token() -> String {
    "test-auth-token".to_string()
}

/// One SSE frame with the given event name and single data line.
pub fn sse_frame(event: &str, data: &str) -> String {
    format!("event: {}\ndata: {}\n\n", event, data)
}

/// A complete, successful answer: session, fragments, done.
pub fn answer_body(session_id: &str, fragments: &[&str]) -> String {
    let mut body = sse_frame("session", &format!(r#"{{"sessionId":"{}"}}"#, session_id));
    for fragment in fragments {
        body.push_str(&sse_frame("message", fragment));
    }
    body.push_str(&sse_frame(
        "done",
        r#"{"conversationId":17,"category":"general"}"#,
    ));
    body
}

/// Serve `body` as an event stream from the chat endpoint.
pub async fn mount_chat_stream(server: &MockServer, body: String) {
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/event-stream")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

/// Client pointed at the mock server, authenticated with [`test_token`].
pub fn client_for(server: &MockServer) -> ChatClient {
    let config = ClientConfig::default()
        .with_base_url(server.uri())
        .with_token(test_token());
    ChatClient::from_config(config).expect("client should build")
}
