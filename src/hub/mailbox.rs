//! # Subscriber mailbox (read side).
//!
//! A [`Mailbox`] is the receiving end of one subscriber's bounded queue. The hub
//! keeps the sending end inside its subscriber set and is the only writer.
//!
//! ## Closure
//! ```text
//! Hub::unsubscribe(id) / Hub::shutdown()
//!     ├─► remove sender from subscriber set   (under hub lock)
//!     └─► drop sender                         (mailbox now closed)
//!
//! Mailbox::recv()
//!     ├─► Some(msg)  buffered messages are still handed out
//!     └─► None       closed and empty: end of stream
//! ```
//!
//! Dropping a `Mailbox` (or calling [`Mailbox::close`]) without unsubscribing is
//! noticed on the next publish: the hub prunes the subscriber then.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use thiserror::Error;
use tokio::sync::mpsc;

use super::SubscriberId;
use crate::message::Message;

/// Error returned by [`Mailbox::try_recv`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryRecvError {
    /// Nothing pending right now; the mailbox is still open.
    #[error("mailbox is empty")]
    Empty,
    /// The mailbox was closed and every buffered message was read.
    #[error("mailbox is closed")]
    Closed,
}

/// Receiving end of a subscriber's bounded queue.
///
/// Yields messages in publish (sequence) order. Also usable as a
/// [`Stream`] of [`Message`]s.
#[derive(Debug)]
pub struct Mailbox {
    id: SubscriberId,
    rx: mpsc::Receiver<Message>,
}

impl Mailbox {
    pub(crate) fn new(id: SubscriberId, rx: mpsc::Receiver<Message>) -> Self {
        Self { id, rx }
    }

    /// Handle of the subscription this mailbox belongs to.
    #[inline]
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Waits for the next message.
    ///
    /// Returns `None` once the hub closed the mailbox and nothing is left to read.
    pub async fn recv(&mut self) -> Option<Message> {
        self.rx.recv().await
    }

    /// Takes the next message if one is pending.
    pub fn try_recv(&mut self) -> Result<Message, TryRecvError> {
        self.rx.try_recv().map_err(|err| match err {
            mpsc::error::TryRecvError::Empty => TryRecvError::Empty,
            mpsc::error::TryRecvError::Disconnected => TryRecvError::Closed,
        })
    }

    /// Blocking variant of [`recv`](Self::recv) for consumers on plain OS threads.
    ///
    /// # Panics
    /// Panics if called from within an async execution context.
    pub fn blocking_recv(&mut self) -> Option<Message> {
        self.rx.blocking_recv()
    }

    /// Closes the mailbox from the consumer side.
    ///
    /// Already buffered messages can still be read. The hub stops delivering
    /// and prunes the subscriber on its next publish.
    pub fn close(&mut self) {
        self.rx.close();
    }

    /// True once the mailbox is closed (by the hub or via [`close`](Self::close)).
    ///
    /// Buffered messages may still be pending; use [`recv`](Self::recv) to drain them.
    pub fn is_closed(&self) -> bool {
        self.rx.is_closed()
    }

    /// Number of messages waiting to be read.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// True if no message is waiting.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl Stream for Mailbox {
    type Item = Message;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Message>> {
        self.rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::MessageLog;
    use futures::StreamExt;

    fn mailbox(cap: usize) -> (mpsc::Sender<Message>, Mailbox) {
        let (tx, rx) = mpsc::channel(cap);
        (tx, Mailbox::new(SubscriberId::from_raw(0), rx))
    }

    #[tokio::test]
    async fn test_buffered_messages_survive_close() {
        let log = MessageLog::new();
        let (tx, mut mb) = mailbox(4);
        tx.try_send(log.append("alice", "one")).expect("send");
        drop(tx);

        assert!(mb.is_closed());
        assert_eq!(mb.len(), 1);
        assert_eq!(mb.recv().await.map(|m| m.sequence()), Some(0));
        assert_eq!(mb.recv().await, None);
    }

    #[test]
    fn test_try_recv_distinguishes_empty_and_closed() {
        let (tx, mut mb) = mailbox(1);
        assert_eq!(mb.try_recv(), Err(TryRecvError::Empty));
        drop(tx);
        assert_eq!(mb.try_recv(), Err(TryRecvError::Closed));
    }

    #[tokio::test]
    async fn test_stream_ends_when_sender_dropped() {
        let log = MessageLog::new();
        let (tx, mb) = mailbox(4);
        for i in 0..3 {
            tx.try_send(log.append("bob", format!("{i}"))).expect("send");
        }
        drop(tx);

        let seqs: Vec<u64> = mb.map(|m| m.sequence()).collect().await;
        assert_eq!(seqs, vec![0, 1, 2]);
    }

    #[test]
    fn test_consumer_close_rejects_sends() {
        let log = MessageLog::new();
        let (tx, mut mb) = mailbox(2);
        mb.close();
        assert!(matches!(
            tx.try_send(log.append("carol", "late")),
            Err(mpsc::error::TrySendError::Closed(_))
        ));
    }
}
