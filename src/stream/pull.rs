//! Pull-style consumption of a chat stream.
//!
//! Wraps a transport [`ByteStream`] in a `Stream` of [`ChatStreamItem`]s,
//! the same unfold-over-bytes approach used for callback delivery, minus
//! the callbacks. The stream ends after its first terminal item. Dropping
//! it drops the transport and with it any buffered bytes.

use std::collections::VecDeque;
use std::pin::Pin;

use futures::stream::{self, Stream, StreamExt};

use crate::traits::ByteStream;

use super::dispatcher::StreamDispatcher;
use super::handlers::ChatStreamItem;

/// Boxed stream of caller-visible events.
pub type ChatEventStream = Pin<Box<dyn Stream<Item = ChatStreamItem> + Send>>;

type PullState = (ByteStream, StreamDispatcher<VecDeque<ChatStreamItem>>);

/// Decode `bytes` lazily; each poll reads at most one chunk from the transport.
pub fn chat_events(bytes: ByteStream) -> ChatEventStream {
    let initial: Option<PullState> = Some((bytes, StreamDispatcher::new(VecDeque::new())));

    let events = stream::unfold(initial, |state| async move {
        let (mut bytes, mut dispatcher) = state?;
        loop {
            if let Some(item) = dispatcher.sink_mut().pop_front() {
                return Some((item, Some((bytes, dispatcher))));
            }
            if dispatcher.is_terminated() {
                return None;
            }

            match bytes.next().await {
                Some(Ok(chunk)) => dispatcher.feed(&chunk),
                Some(Err(e)) => dispatcher.fail(e.into()),
                None => dispatcher.finish(),
            }
        }
    });

    Box::pin(events)
}
