//! Chat client for the AI Q&A backend.
//!
//! Opens the streaming chat endpoint and drives the response through a
//! [`StreamDispatcher`], either into callbacks ([`ChatClient::start`]) or as
//! a pull stream ([`ChatClient::stream_events`]).

use futures_util::StreamExt;

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, StreamError};
use crate::models::ChatRequest;
use crate::stream::{
    chat_events, CancelHandle, ChatEventStream, EventSink, StreamDispatcher, StreamOutcome,
};
use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// Client for the streaming chat endpoint.
///
/// Generic over the transport so tests can substitute a mock.
#[derive(Debug, Clone)]
pub struct ChatClient<C: HttpClient = ReqwestHttpClient> {
    http: C,
    config: ClientConfig,
}

impl ChatClient<ReqwestHttpClient> {
    /// Create a client backed by reqwest.
    pub fn from_config(config: ClientConfig) -> ClientResult<Self> {
        let http = ReqwestHttpClient::from_config(&config).map_err(StreamError::from)?;
        Ok(Self::new(http, config))
    }
}

impl<C: HttpClient> ChatClient<C> {
    pub fn new(http: C, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn stream_url(&self) -> String {
        self.config.stream_url()
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        if let Some(token) = &self.config.token {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }

    fn encode(request: &ChatRequest) -> ClientResult<String> {
        request.validate().map_err(ClientError::InvalidRequest)?;
        Ok(serde_json::to_string(request)?)
    }

    async fn open(&self, body: &str) -> Result<ByteStream, HttpError> {
        let url = self.stream_url();
        tracing::info!(url = %url, "Opening chat stream");
        self.http.post_stream(&url, body, &self.headers()).await
    }

    /// Send `request` and deliver the response to `sink` until it terminates.
    ///
    /// Only an invalid request is returned as `Err`. Transport failures,
    /// backend errors and truncated streams reach `sink.on_error` and are
    /// summarized in the returned outcome. Cancelling `cancel` stops
    /// delivery promptly without invoking any handler.
    pub async fn start<S: EventSink>(
        &self,
        request: &ChatRequest,
        sink: S,
        cancel: &CancelHandle,
    ) -> ClientResult<StreamOutcome> {
        let body = Self::encode(request)?;
        let mut dispatcher = StreamDispatcher::new(sink).with_cancel_handle(cancel.clone());

        let opened = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Chat stream cancelled before it opened");
                return Ok(dispatcher.into_outcome());
            }
            result = self.open(&body) => result,
        };

        let mut bytes = match opened {
            Ok(bytes) => bytes,
            Err(e) => {
                dispatcher.fail(e.into());
                return Ok(dispatcher.into_outcome());
            }
        };

        while !dispatcher.is_terminated() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => dispatcher.cancel(),
                next = bytes.next() => match next {
                    Some(Ok(chunk)) => dispatcher.feed(&chunk),
                    Some(Err(e)) => dispatcher.fail(e.into()),
                    None => dispatcher.finish(),
                },
            }
        }

        let outcome = dispatcher.into_outcome();
        tracing::info!(
            reason = outcome.reason.as_str(),
            session_id = ?outcome.session_id,
            messages = outcome.messages_delivered,
            "Chat stream finished"
        );
        Ok(outcome)
    }

    /// Send `request` and return the response as a pull stream.
    ///
    /// Failing to open the stream is returned as `Err`; everything after
    /// that arrives as [`ChatStreamItem`](crate::stream::ChatStreamItem)s.
    /// Dropping the stream cancels it.
    pub async fn stream_events(&self, request: &ChatRequest) -> ClientResult<ChatEventStream> {
        let body = Self::encode(request)?;
        let bytes = self.open(&body).await.map_err(StreamError::from)?;
        Ok(chat_events(bytes))
    }
}
