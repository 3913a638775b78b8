//! The ask command: stream one answer to a writer.

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::client::ChatClient;
use crate::error::ClientResult;
use crate::stream::{CancelHandle, StreamHandlers, StreamOutcome, TerminationReason};
use crate::traits::HttpClient;

use super::args::AskOptions;

/// Exit status for a finished ask.
pub fn exit_code(outcome: &StreamOutcome) -> i32 {
    match outcome.reason {
        TerminationReason::Completed => 0,
        TerminationReason::Cancelled => 130,
        _ => 1,
    }
}

/// Stream the answer to `options` into `out` as fragments arrive.
///
/// Errors are reported on stderr. A write failure on `out` (a closed pipe,
/// say) cancels the stream.
pub async fn run_ask<C, W>(
    client: &ChatClient<C>,
    options: &AskOptions,
    cancel: &CancelHandle,
    out: W,
) -> ClientResult<StreamOutcome>
where
    C: HttpClient,
    W: Write + Send + 'static,
{
    let out = Arc::new(Mutex::new(out));

    let handlers = StreamHandlers::new()
        .with_on_message({
            let out = out.clone();
            let cancel = cancel.clone();
            move |fragment, _session_id| {
                let Ok(mut out) = out.lock() else { return };
                if out
                    .write_all(fragment.as_bytes())
                    .and_then(|_| out.flush())
                    .is_err()
                {
                    tracing::debug!("Output closed, cancelling stream");
                    cancel.cancel();
                }
            }
        })
        .with_on_done({
            let out = out.clone();
            move |done| {
                if let Ok(mut out) = out.lock() {
                    if let Err(e) = writeln!(out).and_then(|_| out.flush()) {
                        tracing::debug!(error = %e, "Failed to finish output line");
                    }
                }
                if let Some(session_id) = done.session_id() {
                    eprintln!("[session {}]", session_id);
                }
            }
        })
        .with_on_error(|message| {
            eprintln!("\nError: {}", message);
        });

    client.start(&options.to_request(), handlers, cancel).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::config::ClientConfig;
    use crate::models::MessageType;
    use crate::traits::HttpError;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Accepts fragments but fails on the closing newline.
    struct RejectsNewline;

    impl Write for RejectsNewline {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if buf == b"\n" {
                Err(std::io::ErrorKind::BrokenPipe.into())
            } else {
                Ok(buf.len())
            }
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn client(response: MockResponse) -> ChatClient<MockHttpClient> {
        let http = MockHttpClient::new();
        http.set_default_response(response);
        ChatClient::new(http, ClientConfig::default())
    }

    fn options(message: &str) -> AskOptions {
        AskOptions {
            message: message.to_string(),
            ..AskOptions::default()
        }
    }

    #[tokio::test]
    async fn test_run_ask_writes_answer() {
        let client = client(MockResponse::from_chunks([
            "event: session\ndata: {\"sessionId\":\"s-1\"}\n\n",
            "event: message\ndata: Recursion is \n\n",
            "event: message\ndata: a function calling itself.\n\n",
            "event: done\ndata: {}\n\n",
        ]));
        let buffer = SharedBuffer::default();

        let outcome = run_ask(
            &client,
            &options("what is recursion"),
            &CancelHandle::new(),
            buffer.clone(),
        )
        .await
        .unwrap();

        assert_eq!(exit_code(&outcome), 0);
        assert_eq!(buffer.contents(), "Recursion is a function calling itself.\n");
    }

    #[tokio::test]
    async fn test_run_ask_sends_options() {
        let client = client(MockResponse::from_chunks(["event: done\ndata: {}\n\n"]));
        let options = AskOptions {
            message: "login help".to_string(),
            session_id: Some("s-2".to_string()),
            recommend: true,
            message_type: MessageType::Help,
        };

        run_ask(&client, &options, &CancelHandle::new(), SharedBuffer::default())
            .await
            .unwrap();

        let body: serde_json::Value =
            serde_json::from_str(&client.http().get_requests()[0].body).unwrap();
        assert_eq!(body["sessionId"], "s-2");
        assert_eq!(body["needRecommendation"], true);
        assert_eq!(body["messageType"], "help");
    }

    #[tokio::test]
    async fn test_run_ask_failure_exit_code() {
        let client = client(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));

        let outcome = run_ask(
            &client,
            &options("hi"),
            &CancelHandle::new(),
            SharedBuffer::default(),
        )
        .await
        .unwrap();

        assert_eq!(exit_code(&outcome), 1);
    }

    #[tokio::test]
    async fn test_run_ask_cancels_on_closed_output() {
        let client = client(MockResponse::from_chunks([
            "event: message\ndata: one\n\nevent: message\ndata: two\n\n",
            "event: done\ndata: {}\n\n",
        ]));

        let outcome = run_ask(&client, &options("hi"), &CancelHandle::new(), ClosedPipe)
            .await
            .unwrap();

        assert!(outcome.is_cancelled());
        assert_eq!(outcome.messages_delivered, 1);
        assert_eq!(exit_code(&outcome), 130);
    }

    #[tokio::test]
    async fn test_run_ask_completes_when_final_newline_fails() {
        let client = client(MockResponse::from_chunks([
            "event: message\ndata: answer\n\n",
            "event: done\ndata: {}\n\n",
        ]));

        let outcome = run_ask(&client, &options("hi"), &CancelHandle::new(), RejectsNewline)
            .await
            .unwrap();

        assert!(outcome.is_completed());
        assert_eq!(exit_code(&outcome), 0);
    }
}
