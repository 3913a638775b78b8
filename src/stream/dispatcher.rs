//! Per-stream dispatch state machine.
//!
//! One `StreamDispatcher` owns everything a single stream needs: the
//! framer's pending bytes, the correlated session id, and the terminal
//! state. Chunks are drained completely (framed, decoded, correlated,
//! dispatched) before the call returns, so fragments reach the sink in
//! arrival order.

use crate::error::StreamError;
use crate::models::DoneEvent;
use crate::sse::{
    ErrorPayload, EventDecoder, EventKind, SessionCorrelator, SseEvent, SseFrame, SseFramer,
};

use super::cancel::CancelHandle;
use super::handlers::{EventSink, StreamHandlers};
use super::outcome::{StreamOutcome, TerminationReason};

/// Message given to `on_error` when an `error` event carries no usable text.
pub const GENERIC_ERROR_MESSAGE: &str = "AI service error";

#[derive(Debug, Clone, PartialEq)]
enum DispatchState {
    Open,
    Terminated(TerminationReason),
}

/// Drives framing, decoding, and correlation for one stream and delivers
/// the results to an [`EventSink`].
///
/// States are `Open → Terminated`; termination happens exactly once and
/// every later call is a no-op.
#[derive(Debug)]
pub struct StreamDispatcher<S: EventSink = StreamHandlers> {
    framer: SseFramer,
    decoder: EventDecoder,
    correlator: SessionCorrelator,
    sink: S,
    cancel: Option<CancelHandle>,
    state: DispatchState,
    messages_delivered: usize,
}

impl<S: EventSink> StreamDispatcher<S> {
    pub fn new(sink: S) -> Self {
        Self {
            framer: SseFramer::new(),
            decoder: EventDecoder::new(),
            correlator: SessionCorrelator::new(),
            sink,
            cancel: None,
            state: DispatchState::Open,
            messages_delivered: 0,
        }
    }

    /// Observe `handle` before every frame, so a cancel issued from inside a
    /// handler stops the rest of the current chunk too.
    pub fn with_cancel_handle(mut self, handle: CancelHandle) -> Self {
        self.cancel = Some(handle);
        self
    }

    /// Process one transport chunk.
    pub fn feed(&mut self, chunk: &[u8]) {
        if self.is_terminated() {
            tracing::trace!(bytes = chunk.len(), "Ignoring chunk after stream terminated");
            return;
        }
        if self.cancel_requested() {
            self.cancel();
            return;
        }

        for frame in self.framer.feed(chunk) {
            if self.cancel_requested() {
                self.cancel();
                return;
            }
            self.process_frame(&frame);
            if self.is_terminated() {
                // Anything after a terminal event is never delivered
                self.framer.clear();
                return;
            }
        }
    }

    /// The transport reached end-of-stream.
    ///
    /// Flushes an unterminated final frame through the normal path. A stream
    /// that never produced `done` or `error` is reported to `on_error` as
    /// having ended unexpectedly.
    pub fn finish(&mut self) {
        if self.is_terminated() {
            return;
        }
        if self.cancel_requested() {
            self.cancel();
            return;
        }

        if let Some(frame) = self.framer.flush() {
            self.process_frame(&frame);
        }

        if !self.is_terminated() {
            let err = StreamError::EndedUnexpectedly;
            tracing::warn!(
                session_id = ?self.correlator.session_id(),
                messages = self.messages_delivered,
                "{}",
                err
            );
            self.sink.on_error(&err.user_message());
            self.terminate(TerminationReason::EndedWithoutCompletion);
        }
    }

    /// The transport failed; report it and terminate without framing anything.
    pub fn fail(&mut self, error: StreamError) {
        if self.is_terminated() {
            return;
        }

        tracing::warn!(code = error.error_code(), "Stream transport failed: {}", error);
        self.framer.clear();
        self.sink.on_error(&error.user_message());
        self.terminate(TerminationReason::TransportFailed(error));
    }

    /// Stop immediately, dropping buffered bytes. No handler is invoked.
    pub fn cancel(&mut self) {
        if self.is_terminated() {
            return;
        }

        self.framer.clear();
        self.terminate(TerminationReason::Cancelled);
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.state, DispatchState::Terminated(_))
    }

    pub fn termination_reason(&self) -> Option<&TerminationReason> {
        match &self.state {
            DispatchState::Open => None,
            DispatchState::Terminated(reason) => Some(reason),
        }
    }

    /// Summary of the stream, once terminated.
    pub fn outcome(&self) -> Option<StreamOutcome> {
        self.termination_reason().map(|reason| StreamOutcome {
            reason: reason.clone(),
            session_id: self.correlator.session_id().map(str::to_string),
            messages_delivered: self.messages_delivered,
        })
    }

    /// Consume the dispatcher; a stream still open at this point is cancelled.
    pub fn into_outcome(mut self) -> StreamOutcome {
        self.cancel();
        StreamOutcome {
            reason: match self.state {
                DispatchState::Terminated(reason) => reason,
                DispatchState::Open => TerminationReason::Cancelled,
            },
            session_id: self.correlator.session_id().map(str::to_string),
            messages_delivered: self.messages_delivered,
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.correlator.session_id()
    }

    pub fn messages_delivered(&self) -> usize {
        self.messages_delivered
    }

    /// Bytes received but not yet part of a complete frame.
    pub fn pending_bytes(&self) -> usize {
        self.framer.pending_len()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn cancel_requested(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelHandle::is_cancelled)
    }

    fn process_frame(&mut self, frame: &SseFrame) {
        let event = self.correlator.observe(self.decoder.decode(frame));
        self.dispatch(event);
    }

    fn dispatch(&mut self, event: SseEvent) {
        match event.kind {
            // Correlation already happened in the correlator
            EventKind::Session => {}
            EventKind::Message => {
                self.messages_delivered += 1;
                self.sink
                    .on_message(&event.raw_data, event.session_id.as_deref());
            }
            EventKind::Done => {
                let done = DoneEvent::from_raw(&event.raw_data, event.session_id.as_deref());
                self.sink.on_done(done);
                self.terminate(TerminationReason::Completed);
            }
            EventKind::Error => {
                let message = ErrorPayload::extract_message(&event.raw_data).unwrap_or_else(|| {
                    tracing::debug!(payload = %event.raw_data, "Error event without a usable message");
                    GENERIC_ERROR_MESSAGE.to_string()
                });
                self.sink.on_error(&message);
                self.terminate(TerminationReason::BackendError(message));
            }
            EventKind::Unknown(name) => {
                tracing::trace!(event = %name, "Dropping unrecognized SSE frame");
            }
        }
    }

    fn terminate(&mut self, reason: TerminationReason) {
        tracing::debug!(
            reason = reason.as_str(),
            session_id = ?self.correlator.session_id(),
            messages = self.messages_delivered,
            "Stream terminated"
        );
        self.state = DispatchState::Terminated(reason);
    }
}
