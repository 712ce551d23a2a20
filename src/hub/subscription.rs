//! # Self-removing subscription.
//!
//! A transport maps one long-lived connection to one [`Subscription`]: read
//! messages until the client goes away, then drop it. The drop is the explicit
//! unsubscribe path; no hub resources wait for garbage to be noticed.
//!
//! ```rust
//! use chathub::{Hub, HubConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let hub = Hub::new(HubConfig::default());
//! {
//!     let mut sub = hub.subscription().expect("hub is open");
//!     hub.publish("alice", "hi");
//!     assert_eq!(sub.recv().await.map(|m| m.sequence()), Some(0));
//!     assert_eq!(hub.subscriber_count(), 1);
//! } // client disconnected
//! assert_eq!(hub.subscriber_count(), 0);
//! # }
//! ```

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;

use super::{Hub, Mailbox, SubscriberId, TryRecvError};
use crate::message::Message;

/// A mailbox that unsubscribes from its hub when dropped.
pub struct Subscription {
    hub: Hub,
    mailbox: Mailbox,
}

impl Subscription {
    pub(crate) fn new(hub: Hub, mailbox: Mailbox) -> Self {
        Self { hub, mailbox }
    }

    /// Handle of this subscription.
    #[inline]
    pub fn id(&self) -> SubscriberId {
        self.mailbox.id()
    }

    /// Waits for the next message; `None` after the hub closed the mailbox.
    pub async fn recv(&mut self) -> Option<Message> {
        self.mailbox.recv().await
    }

    /// Takes the next message if one is pending.
    pub fn try_recv(&mut self) -> Result<Message, TryRecvError> {
        self.mailbox.try_recv()
    }

    /// Direct access to the underlying mailbox.
    pub fn mailbox(&mut self) -> &mut Mailbox {
        &mut self.mailbox
    }

    /// Unsubscribes now. Equivalent to dropping the subscription.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.mailbox.id());
    }
}

impl Stream for Subscription {
    type Item = Message;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Message>> {
        Pin::new(&mut self.mailbox).poll_next(cx)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id())
            .finish_non_exhaustive()
    }
}
