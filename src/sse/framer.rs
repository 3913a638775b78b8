//! Byte-level SSE framing
//!
//! Accumulates raw transport chunks and cuts them into complete frames at
//! blank-line delimiters. Chunks may split lines, delimiters, or UTF-8
//! sequences anywhere; bytes stay buffered until their frame is complete.
//!
//! Framing happens on bytes and decoding happens per frame. `\n` never
//! appears inside a multi-byte UTF-8 sequence, so every delimiter position
//! is also a valid decode boundary.

use bytes::{Buf, BytesMut};

use crate::sse::events::SseFrame;

/// Incremental SSE framer that turns byte chunks into frames.
#[derive(Debug, Default)]
pub struct SseFramer {
    /// Bytes received but not yet part of a complete frame
    buffer: BytesMut,
    /// Offset from which the next delimiter search starts
    search_from: usize,
}

impl SseFramer {
    /// Create an empty framer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every frame it completes, in arrival order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some((end, delimiter_len)) = find_frame_boundary(&self.buffer, self.search_from)
        {
            let raw = self.buffer.split_to(end);
            self.buffer.advance(delimiter_len);
            self.search_from = 0;
            frames.push(SseFrame::new(String::from_utf8_lossy(&raw).into_owned()));
        }

        // A delimiter can straddle the next chunk by at most two bytes ("\n\r")
        self.search_from = self.buffer.len().saturating_sub(2);
        frames
    }

    /// Emit whatever is left as a final frame once the source has ended.
    ///
    /// The server may close the connection without a trailing blank line.
    /// Returns `None` when the residue is empty or whitespace only.
    pub fn flush(&mut self) -> Option<SseFrame> {
        if self.buffer.is_empty() {
            return None;
        }

        let raw = self.buffer.split();
        self.search_from = 0;

        let text = String::from_utf8_lossy(&raw);
        if text.trim().is_empty() {
            None
        } else {
            Some(SseFrame::new(text.into_owned()))
        }
    }

    /// Number of buffered bytes not yet framed.
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }

    /// Drop any buffered bytes.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.search_from = 0;
    }
}

/// Find the first blank-line delimiter at or after `from`.
///
/// Returns the frame end and the delimiter length. Accepts `\n\n` and
/// `\n\r\n` (the tail of `\r\n\r\n`; the frame's own trailing `\r` is
/// stripped at line level).
fn find_frame_boundary(buf: &[u8], from: usize) -> Option<(usize, usize)> {
    let mut start = from.min(buf.len());
    while let Some(offset) = buf[start..].iter().position(|&b| b == b'\n') {
        let pos = start + offset;
        match buf.get(pos + 1) {
            Some(b'\n') => return Some((pos, 2)),
            Some(b'\r') if buf.get(pos + 2) == Some(&b'\n') => return Some((pos, 3)),
            _ => {}
        }
        start = pos + 1;
    }
    None
}
