//! # Append-only message log.
//!
//! Ordered, in-memory record of every message published through a hub.
//!
//! ## Architecture
//! ```text
//! Hub::publish ──► MessageLog::append(author, content)
//!                          │  (write lock: assign seq = len, push)
//!                          ▼
//!                  RwLock<Vec<Message>>
//!                          ▲
//! Hub::snapshot ───────────┘  (read lock: clone prefix)
//! ```
//!
//! ## Rules
//! - Sequence numbers start at 0 and increase by exactly 1 per append
//! - Appended messages are never moved, mutated or removed
//! - Snapshots never observe a half-applied append
//! - Snapshots run concurrently with each other; appends are serialized

use std::sync::Arc;

use parking_lot::RwLock;

use crate::message::Message;

/// Thread-safe, append-only log of [`Message`]s.
///
/// The sequence number of a message equals its index in the log, so the
/// counter and the storage are updated under the same write lock.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: RwLock<Vec<Message>>,
}

impl MessageLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty log behind an `Arc`, ready to be shared with a hub.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Appends a message and returns it with its assigned sequence number.
    ///
    /// Never fails. The log does not interpret `author` or `content`; an empty
    /// author is stored as-is.
    pub fn append(&self, author: impl Into<Arc<str>>, content: impl Into<Arc<str>>) -> Message {
        let (author, content) = (author.into(), content.into());

        let mut entries = self.entries.write();
        let sequence = entries.len() as u64;
        let message = Message::new(author, content, sequence);
        entries.push(message.clone());
        message
    }

    /// Returns a copy of all messages appended so far, in append order.
    pub fn snapshot(&self) -> Vec<Message> {
        self.entries.read().clone()
    }

    /// Returns the messages with `sequence >= from`, in append order.
    ///
    /// Useful for a transport that rendered an earlier snapshot and only needs
    /// the tail.
    pub fn since(&self, from: u64) -> Vec<Message> {
        let entries = self.entries.read();
        let start = usize::try_from(from).unwrap_or(usize::MAX).min(entries.len());
        entries[start..].to_vec()
    }

    /// The most recently appended message, if any.
    pub fn last(&self) -> Option<Message> {
        self.entries.read().last().cloned()
    }

    /// Number of messages appended so far.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if nothing was appended yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
