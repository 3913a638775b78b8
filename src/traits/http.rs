//! HTTP transport trait abstraction.
//!
//! The stream core never talks to the network itself. It consumes an
//! ordered stream of byte chunks produced by an [`HttpClient`], which lets
//! tests script chunk boundaries and failures exactly.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;
use thiserror::Error;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// Ordered source of raw response chunks; `None` signals end-of-stream.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Transport failures, either while opening the request or mid-body.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HttpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request timeout: {0}")]
    Timeout(String),
    /// Non-2xx status; `message` is the response body, if any
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },
    #[error("Request cancelled")]
    Cancelled,
    /// Reading the body failed after the response started
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP error: {0}")]
    Other(String),
}

/// Trait for the streaming HTTP transport.
///
/// Implementations include the production reqwest-based client and a mock
/// client that replays scripted chunks.
///
/// # Example
///
/// ```ignore
/// use futures::StreamExt;
/// use qachat::traits::{Headers, HttpClient, HttpError};
///
/// async fn dump<C: HttpClient>(client: &C) -> Result<(), HttpError> {
///     let mut body = client.post_stream("http://localhost:8080/api/ai/chat/stream", "{}", &Headers::new()).await?;
///     while let Some(chunk) = body.next().await {
///         println!("{} bytes", chunk?.len());
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a POST request and return the response body as a chunk stream.
    ///
    /// This is used for Server-Sent Events (SSE) streams where the response
    /// body is received incrementally. Non-2xx statuses are reported as
    /// `HttpError::ServerError` before any chunk is produced.
    ///
    /// # Arguments
    /// * `url` - The URL to request
    /// * `body` - Request body as a string
    /// * `headers` - Request headers
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{stream, StreamExt};

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::ServerError {
                status: 503,
                message: "overloaded".to_string()
            }
            .to_string(),
            "Server error (503): overloaded"
        );
        assert_eq!(
            HttpError::Io("connection reset".to_string()).to_string(),
            "IO error: connection reset"
        );
    }

    #[tokio::test]
    async fn test_byte_stream_yields_chunks_then_error() {
        let items = vec![
            Ok(Bytes::from_static(b"event: message\n")),
            Err(HttpError::Io("reset".to_string())),
        ];
        let mut body: ByteStream = Box::pin(stream::iter(items));

        assert_eq!(
            body.next().await,
            Some(Ok(Bytes::from_static(b"event: message\n")))
        );
        assert!(matches!(body.next().await, Some(Err(HttpError::Io(_)))));
        assert!(body.next().await.is_none());
    }
}
