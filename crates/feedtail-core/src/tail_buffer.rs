//! Rolling "keep the last K bytes" buffer.
//!
//! Emulates a tail read when the server streams the whole document: each
//! appended chunk is kept, then the oldest bytes are discarded so the buffer
//! never holds more than `capacity` bytes after an append.

use std::collections::VecDeque;

/// Bounded accumulation buffer that keeps only the most recent bytes.
#[derive(Debug, Clone)]
pub struct TailBuffer {
    buf: VecDeque<u8>,
    capacity: usize,
    total_seen: u64,
}

impl TailBuffer {
    /// Creates an empty buffer that retains at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
            total_seen: 0,
        }
    }

    /// Appends a chunk and trims from the front down to `capacity`.
    pub fn push(&mut self, chunk: &[u8]) {
        self.total_seen += chunk.len() as u64;
        // A chunk larger than the window only contributes its own tail.
        let chunk = if chunk.len() > self.capacity {
            &chunk[chunk.len() - self.capacity..]
        } else {
            chunk
        };
        self.buf.extend(chunk);
        if self.buf.len() > self.capacity {
            let excess = self.buf.len() - self.capacity;
            self.buf.drain(..excess);
        }
    }

    /// Number of bytes currently retained.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total bytes appended over the buffer's lifetime, including discarded ones.
    pub fn total_seen(&self) -> u64 {
        self.total_seen
    }

    /// True once at least one byte has been discarded from the front.
    pub fn truncated(&self) -> bool {
        self.total_seen > self.buf.len() as u64
    }

    /// Consumes the buffer and returns the retained bytes in order.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf.into_iter().collect()
    }
}
