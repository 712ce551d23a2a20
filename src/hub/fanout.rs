//! # Hub: subscriber set, publish fan-out and shutdown.
//!
//! The [`Hub`] owns the live subscriber set, the message log and the event bus.
//! It is a cheap `Clone` handle; every clone talks to the same state.
//!
//! ## Architecture
//! ```text
//! publish(author, content)
//!     │  lock(state)
//!     ├──► MessageLog::append ──► Message{seq}
//!     ├──► try_send ──► [mailbox 1] (bounded) ──► Mailbox::recv()  (subscriber 1)
//!     ├──► try_send ──► [mailbox 2] (bounded) ──► Mailbox::recv()  (subscriber 2)
//!     └──► try_send ──► [mailbox N] (bounded) ──► Mailbox::recv()  (subscriber N)
//!        unlock(state)
//! ```
//!
//! ## Rules
//! - **Non-blocking**: only `try_send` happens while the state lock is held
//! - **Overflow**: a full mailbox drops the message for that subscriber only (`DeliveryDropped`)
//! - **Per-subscriber order**: append and fan-out share one critical section, so
//!   every mailbox receives strictly increasing sequence numbers
//! - **Removal before close**: a sender leaves the set under the lock and is
//!   dropped (closing the mailbox) only after that
//! - **Pruning**: a mailbox whose receiver went away is removed on the next publish
//!
//! ## State machine
//! ```text
//! Open ──shutdown()──► Closed (terminal)
//!
//! Closed: subscribe → Err(HubError::Closed)
//!         publish   → appended to the log, reaches nobody
//!         unsubscribe → no-op
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use super::{HubBuilder, HubStats, Mailbox, SubscriberId, Subscription};
use crate::{
    config::Config,
    error::HubError,
    events::{Bus, Event, EventKind},
    log::MessageLog,
    message::Message,
};

/// Sending half of one subscriber's mailbox plus per-subscriber counters.
struct Subscriber {
    sender: mpsc::Sender<Message>,
    delivered: u64,
    dropped: u64,
}

/// Everything guarded by the hub lock.
#[derive(Default)]
struct State {
    closed: bool,
    subscribers: HashMap<SubscriberId, Subscriber>,
    published: u64,
    delivered: u64,
    dropped: u64,
}

struct Inner {
    cfg: Config,
    log: Arc<MessageLog>,
    bus: Bus,
    state: Mutex<State>,
    /// Cancelled on shutdown; stops the observer listener.
    runtime_token: CancellationToken,
    /// Observer listener task, if observers were configured.
    listener: Mutex<Option<JoinHandle<()>>>,
}

/// Broadcast hub: fans each published [`Message`] out to every registered subscriber.
///
/// Construct with [`Hub::new`] or [`Hub::builder`] and pass clones to whatever
/// needs to publish or subscribe.
#[derive(Clone)]
pub struct Hub {
    inner: Arc<Inner>,
}

impl Hub {
    /// Creates an open hub with its own empty log and no observers.
    pub fn new(cfg: Config) -> Self {
        HubBuilder::new(cfg).build()
    }

    /// Starts building a hub with a shared log and/or observers.
    pub fn builder(cfg: Config) -> HubBuilder {
        HubBuilder::new(cfg)
    }

    pub(crate) fn from_parts(
        cfg: Config,
        log: Arc<MessageLog>,
        bus: Bus,
        runtime_token: CancellationToken,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                cfg,
                log,
                bus,
                state: Mutex::new(State::default()),
                runtime_token,
                listener: Mutex::new(None),
            }),
        }
    }

    pub(crate) fn set_listener(&self, handle: JoinHandle<()>) {
        *self.inner.listener.lock() = Some(handle);
    }

    /// Registers a new subscriber and returns its handle and mailbox.
    ///
    /// The mailbox receives every message published after this call returns,
    /// until [`unsubscribe`](Self::unsubscribe) or [`shutdown`](Self::shutdown).
    ///
    /// # Errors
    /// [`HubError::Closed`] once the hub was shut down.
    pub fn subscribe(&self) -> Result<(SubscriberId, Mailbox), HubError> {
        let cap = self.inner.cfg.mailbox_capacity_clamped();

        let mut state = self.inner.state.lock();
        if state.closed {
            debug!("subscribe rejected: hub closed");
            return Err(HubError::Closed);
        }

        let id = SubscriberId::next();

        let (tx, rx) = mpsc::channel(cap);
        state.subscribers.insert(
            id,
            Subscriber {
                sender: tx,
                delivered: 0,
                dropped: 0,
            },
        );
        let count = state.subscribers.len();
        self.inner
            .bus
            .publish(Event::new(EventKind::SubscriberAdded).with_subscriber(id));
        drop(state);

        debug!(subscriber = %id, subscribers = count, capacity = cap, "subscriber added");
        Ok((id, Mailbox::new(id, rx)))
    }

    /// Like [`subscribe`](Self::subscribe), but returns a [`Subscription`] that
    /// unsubscribes itself when dropped.
    ///
    /// # Errors
    /// [`HubError::Closed`] once the hub was shut down.
    pub fn subscription(&self) -> Result<Subscription, HubError> {
        let (_, mailbox) = self.subscribe()?;
        Ok(Subscription::new(self.clone(), mailbox))
    }

    /// Removes a subscriber and closes its mailbox.
    ///
    /// Unknown or already removed handles are ignored. Safe to call while
    /// another thread publishes: the subscriber either gets that message or it
    /// does not, but nothing is sent after its sender left the set.
    pub fn unsubscribe(&self, id: SubscriberId) {
        let removed = {
            let mut state = self.inner.state.lock();
            let removed = state.subscribers.remove(&id);
            if removed.is_some() {
                self.inner
                    .bus
                    .publish(Event::subscriber_removed(id, "unsubscribe"));
            }
            removed
        };

        match removed {
            Some(sub) => {
                // Dropping the last sender closes the mailbox.
                drop(sub.sender);
                debug!(
                    subscriber = %id,
                    delivered = sub.delivered,
                    dropped = sub.dropped,
                    "subscriber removed"
                );
            }
            None => trace!(subscriber = %id, "unsubscribe of unknown subscriber ignored"),
        }
    }

    /// Appends a message to the log and delivers it to every current subscriber.
    ///
    /// Never blocks on consumers: a full mailbox loses this message (the
    /// subscriber sees a gap), everyone else still gets it. Allowed after
    /// shutdown, where the message is logged but reaches no one.
    pub fn publish(&self, author: impl Into<Arc<str>>, content: impl Into<Arc<str>>) -> Message {
        let mut guard = self.inner.state.lock();
        let state = &mut *guard;

        let message = self.inner.log.append(author, content);
        let seq = message.sequence();

        let mut delivered = 0u64;
        let mut dropped = 0u64;
        let mut gone = Vec::new();

        for (id, sub) in state.subscribers.iter_mut() {
            match sub.sender.try_send(message.clone()) {
                Ok(()) => {
                    sub.delivered += 1;
                    delivered += 1;
                }
                Err(mpsc::error::TrySendError::Full(_)) => {
                    sub.dropped += 1;
                    dropped += 1;
                    self.inner.bus.publish(Event::delivery_dropped(*id, seq));
                    warn!(subscriber = %id, sequence = seq, "mailbox full; message dropped");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => gone.push(*id),
            }
        }

        let mut pruned = Vec::with_capacity(gone.len());
        for id in gone {
            if let Some(sub) = state.subscribers.remove(&id) {
                self.inner
                    .bus
                    .publish(Event::subscriber_removed(id, "closed"));
                pruned.push(sub);
            }
        }

        state.published += 1;
        state.delivered += delivered;
        state.dropped += dropped;
        self.inner.bus.publish(
            Event::new(EventKind::MessagePublished)
                .with_sequence(seq)
                .with_reason(format!("delivered={delivered} dropped={dropped}")),
        );
        drop(guard);

        if !pruned.is_empty() {
            debug!(pruned = pruned.len(), "pruned subscribers with dropped mailboxes");
        }
        trace!(sequence = seq, delivered, dropped, "message published");
        message
    }

    /// Validates and publishes.
    ///
    /// Rejects an empty (or whitespace-only) author before anything reaches the
    /// log. Content may be empty.
    ///
    /// # Errors
    /// [`HubError::InvalidMessage`] when the author is blank.
    pub fn try_publish(&self, author: &str, content: &str) -> Result<Message, HubError> {
        if author.trim().is_empty() {
            return Err(HubError::InvalidMessage {
                reason: "author must not be empty".to_string(),
            });
        }
        Ok(self.publish(author, content))
    }

    /// Closes the hub: no further subscriptions, every mailbox closed.
    ///
    /// Readers blocked in [`Mailbox::recv`] wake up, read what is still buffered
    /// and then observe end of stream. Calling it again is a no-op.
    pub fn shutdown(&self) {
        let released = {
            let mut state = self.inner.state.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            self.inner
                .bus
                .publish(Event::new(EventKind::ShutdownRequested));

            let released: Vec<(SubscriberId, Subscriber)> = state.subscribers.drain().collect();
            for (id, _) in &released {
                self.inner
                    .bus
                    .publish(Event::subscriber_removed(*id, "shutdown"));
            }
            self.inner.bus.publish(
                Event::new(EventKind::HubClosed).with_reason(format!("released={}", released.len())),
            );
            released
        };

        let count = released.len();
        drop(released);
        self.inner.runtime_token.cancel();
        info!(released = count, "hub closed");
    }

    /// Shuts down and waits until observers have processed the remaining events.
    pub async fn shutdown_and_wait(&self) {
        self.shutdown();
        let listener = self.inner.listener.lock().take();
        if let Some(handle) = listener {
            if let Err(err) = handle.await {
                warn!(error = %err, "observer listener terminated abnormally");
            }
        }
    }

    /// All messages published so far, in order.
    pub fn snapshot(&self) -> Vec<Message> {
        self.inner.log.snapshot()
    }

    /// Receiver for hub lifecycle events published after this call.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.inner.bus.subscribe()
    }

    /// Consistent view of the hub counters.
    pub fn stats(&self) -> HubStats {
        let state = self.inner.state.lock();
        HubStats {
            subscribers: state.subscribers.len(),
            published: state.published,
            delivered: state.delivered,
            dropped: state.dropped,
            closed: state.closed,
        }
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.state.lock().subscribers.len()
    }

    /// True if `id` is currently registered.
    pub fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.inner.state.lock().subscribers.contains_key(&id)
    }

    /// True once [`shutdown`](Self::shutdown) was called.
    pub fn is_closed(&self) -> bool {
        self.inner.state.lock().closed
    }

    /// The log this hub appends to.
    pub fn log(&self) -> &Arc<MessageLog> {
        &self.inner.log
    }

    /// Configuration the hub was built with.
    pub fn config(&self) -> &Config {
        &self.inner.cfg
    }
}

impl std::fmt::Debug for Hub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("Hub")
            .field("subscribers", &stats.subscribers)
            .field("published", &stats.published)
            .field("closed", &stats.closed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::TryRecvError;

    fn hub(cap: usize) -> Hub {
        Hub::new(Config::default().with_mailbox_capacity(cap))
    }

    #[test]
    fn test_handles_are_unique() {
        let hub = hub(4);
        let (a, _ma) = hub.subscribe().expect("subscribe");
        let (b, _mb) = hub.subscribe().expect("subscribe");
        assert_ne!(a, b);
        assert_eq!(hub.subscriber_count(), 2);
    }

    #[test]
    fn test_publish_reaches_every_subscriber() {
        let hub = hub(4);
        let (_, mut a) = hub.subscribe().expect("subscribe");
        let (_, mut b) = hub.subscribe().expect("subscribe");

        let m = hub.publish("alice", "hi");
        assert_eq!(a.try_recv(), Ok(m.clone()));
        assert_eq!(b.try_recv(), Ok(m));
        assert_eq!(a.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_full_mailbox_drops_for_that_subscriber_only() {
        let hub = hub(1);
        let (slow_id, mut slow) = hub.subscribe().expect("subscribe");
        let (_, mut fast) = hub.subscribe().expect("subscribe");
        let mut events = hub.events();

        hub.publish("a", "0");
        assert_eq!(fast.try_recv().map(|m| m.sequence()), Ok(0));
        hub.publish("a", "1");
        assert_eq!(fast.try_recv().map(|m| m.sequence()), Ok(1));

        assert_eq!(slow.try_recv().map(|m| m.sequence()), Ok(0));
        assert_eq!(slow.try_recv(), Err(TryRecvError::Empty));

        let stats = hub.stats();
        assert_eq!(stats.published, 2);
        assert_eq!(stats.delivered, 3);
        assert_eq!(stats.dropped, 1);

        let mut saw_drop = false;
        while let Ok(ev) = events.try_recv() {
            if ev.is_delivery_drop() {
                assert_eq!(ev.subscriber, Some(slow_id));
                assert_eq!(ev.sequence, Some(1));
                saw_drop = true;
            }
        }
        assert!(saw_drop);
    }

    #[test]
    fn test_unsubscribe_closes_mailbox_and_is_idempotent() {
        let hub = hub(4);
        let (id, mut mb) = hub.subscribe().expect("subscribe");
        hub.unsubscribe(id);
        hub.unsubscribe(id);

        assert!(!hub.is_subscribed(id));
        assert!(mb.is_closed());
        hub.publish("bob", "after");
        assert_eq!(mb.try_recv(), Err(TryRecvError::Closed));
    }

    #[test]
    fn test_dropped_mailbox_is_pruned_on_publish() {
        let hub = hub(4);
        let (id, mb) = hub.subscribe().expect("subscribe");
        drop(mb);
        assert!(hub.is_subscribed(id));

        hub.publish("carol", "anyone?");
        assert!(!hub.is_subscribed(id));
        assert_eq!(hub.stats().delivered, 0);
    }

    #[test]
    fn test_shutdown_rejects_subscribe_but_allows_publish() {
        let hub = hub(4);
        let (_, mut mb) = hub.subscribe().expect("subscribe");
        hub.shutdown();
        hub.shutdown();

        assert!(hub.is_closed());
        assert_eq!(hub.subscriber_count(), 0);
        assert_eq!(hub.subscribe().err(), Some(HubError::Closed));
        assert_eq!(mb.try_recv(), Err(TryRecvError::Closed));

        let m = hub.publish("dave", "still logged");
        assert_eq!(m.sequence(), 0);
        assert_eq!(hub.snapshot().len(), 1);
    }

    #[test]
    fn test_try_publish_rejects_blank_author() {
        let hub = hub(4);
        let err = hub.try_publish("   ", "hello").expect_err("blank author");
        assert_eq!(err.as_label(), "invalid_message");
        assert!(hub.snapshot().is_empty());

        let ok = hub.try_publish("erin", "").expect("empty content is fine");
        assert_eq!(ok.content(), "");
    }
}
