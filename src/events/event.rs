//! # Hub lifecycle events.
//!
//! The [`EventKind`] enum classifies what happened inside a [`Hub`](crate::Hub):
//! - **Membership events**: subscribers joining and leaving the subscriber set
//! - **Delivery events**: messages published, per-subscriber drops
//! - **Shutdown events**: shutdown requested, hub closed
//!
//! The [`Event`] struct carries the optional metadata (subscriber handle, message
//! sequence, reason) that each kind sets.
//!
//! ## Ordering guarantees
//! Every event has a process-wide unique sequence number (`seq`) that increases
//! monotonically. It is unrelated to the message [`sequence`](crate::Message::sequence)
//! assigned by the message log.
//!
//! ## Example
//! ```rust
//! use chathub::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::DeliveryDropped)
//!     .with_sequence(7)
//!     .with_reason("full");
//!
//! assert_eq!(ev.kind, EventKind::DeliveryDropped);
//! assert_eq!(ev.sequence, Some(7));
//! assert_eq!(ev.reason.as_deref(), Some("full"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::hub::SubscriberId;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of hub events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    // === Membership events ===
    /// A subscriber was inserted into the subscriber set.
    ///
    /// Sets:
    /// - `subscriber`: the new handle
    SubscriberAdded,

    /// A subscriber was removed from the subscriber set and its mailbox closed.
    ///
    /// Sets:
    /// - `subscriber`: the removed handle
    /// - `reason`: `"unsubscribe"`, `"closed"` (receiver dropped) or `"shutdown"`
    SubscriberRemoved,

    // === Delivery events ===
    /// A message was appended to the log and fanned out.
    ///
    /// Sets:
    /// - `sequence`: message sequence number
    /// - `reason`: `"delivered=<n> dropped=<m>"`
    MessagePublished,

    /// A message was dropped for one subscriber because its mailbox was full.
    ///
    /// Sets:
    /// - `subscriber`: the lagging handle
    /// - `sequence`: the dropped message's sequence number
    /// - `reason`: `"full"`
    DeliveryDropped,

    // === Shutdown events ===
    /// `shutdown()` was called on an open hub.
    ShutdownRequested,

    /// All subscribers were released; the hub accepts no new subscriptions.
    ///
    /// Sets:
    /// - `reason`: `"released=<n>"`
    HubClosed,
}

impl EventKind {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            EventKind::SubscriberAdded => "subscriber_added",
            EventKind::SubscriberRemoved => "subscriber_removed",
            EventKind::MessagePublished => "message_published",
            EventKind::DeliveryDropped => "delivery_dropped",
            EventKind::ShutdownRequested => "shutdown_requested",
            EventKind::HubClosed => "hub_closed",
        }
    }
}

/// Hub event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing event sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Subscriber handle, if applicable.
    pub subscriber: Option<SubscriberId>,
    /// Message sequence number, if applicable.
    pub sequence: Option<u64>,
    /// Human-readable detail (removal cause, delivery counts, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            subscriber: None,
            sequence: None,
            reason: None,
        }
    }

    /// Attaches a subscriber handle.
    #[inline]
    pub fn with_subscriber(mut self, id: SubscriberId) -> Self {
        self.subscriber = Some(id);
        self
    }

    /// Attaches a message sequence number.
    #[inline]
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber removal event.
    #[inline]
    pub fn subscriber_removed(id: SubscriberId, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberRemoved)
            .with_subscriber(id)
            .with_reason(reason)
    }

    /// Creates a per-subscriber drop event.
    #[inline]
    pub fn delivery_dropped(id: SubscriberId, sequence: u64) -> Self {
        Event::new(EventKind::DeliveryDropped)
            .with_subscriber(id)
            .with_sequence(sequence)
            .with_reason("full")
    }

    #[inline]
    pub fn is_delivery_drop(&self) -> bool {
        matches!(self.kind, EventKind::DeliveryDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::SubscriberAdded);
        let b = Event::new(EventKind::SubscriberAdded);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_delivery_dropped_sets_fields() {
        let id = SubscriberId::from_raw(3);
        let ev = Event::delivery_dropped(id, 42);
        assert!(ev.is_delivery_drop());
        assert_eq!(ev.subscriber, Some(id));
        assert_eq!(ev.sequence, Some(42));
        assert_eq!(ev.reason.as_deref(), Some("full"));
    }

    #[test]
    fn test_labels_are_snake_case() {
        assert_eq!(EventKind::HubClosed.as_label(), "hub_closed");
        assert_eq!(EventKind::MessagePublished.as_label(), "message_published");
    }
}
