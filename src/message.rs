//! # Published message value.
//!
//! A [`Message`] is created only by [`MessageLog::append`](crate::MessageLog::append),
//! which assigns its sequence number. After that it is immutable; clones share the
//! underlying string storage, so fanning one message out to many mailboxes does not
//! copy the text.

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

/// One published message.
///
/// - `author`: opaque user name supplied by the caller (may be empty)
/// - `content`: message text (may be empty)
/// - `sequence`: log-assigned position, starting at 0
/// - `at`: wall-clock time of the append (display only, not used for ordering)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Message {
    author: Arc<str>,
    content: Arc<str>,
    sequence: u64,
    #[cfg_attr(feature = "serde", serde(skip))]
    at: SystemTime,
}

impl Message {
    pub(crate) fn new(author: Arc<str>, content: Arc<str>, sequence: u64) -> Self {
        Self {
            author,
            content,
            sequence,
            at: SystemTime::now(),
        }
    }

    /// Name of the publisher.
    #[inline]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Message text.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Position in the log; strictly increasing by 1 per append.
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Wall-clock time the message was appended.
    #[inline]
    pub fn at(&self) -> SystemTime {
        self.at
    }
}

impl fmt::Display for Message {
    /// Renders as `author: content`, the way the chat page lists messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.author, self.content)
    }
}
