//! # LogWriter: hub events as tracing records
//!
//! A minimal observer that turns incoming [`Event`]s into `tracing` records.
//! Use it for demos or as a starting point for a real audit observer.
//!
//! ## Example output (with `tracing_subscriber::fmt`)
//! ```text
//! DEBUG chathub::observers::log: subscriber joined subscriber=sub-0
//! DEBUG chathub::observers::log: message published sequence=0 detail=delivered=1 dropped=0
//!  WARN chathub::observers::log: delivery dropped subscriber=sub-0 sequence=17
//! DEBUG chathub::observers::log: subscriber left subscriber=sub-0 reason=unsubscribe
//!  INFO chathub::observers::log: shutdown requested
//!  INFO chathub::observers::log: hub closed detail=released=0
//! ```

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::events::{Event, EventKind};
use crate::observers::Observe;

/// Event writer observer.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Observe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let subscriber = e.subscriber.map(|id| id.to_string()).unwrap_or_default();
        let detail = e.reason.as_deref().unwrap_or("");

        match e.kind {
            EventKind::SubscriberAdded => {
                debug!(subscriber = %subscriber, "subscriber joined");
            }
            EventKind::SubscriberRemoved => {
                debug!(subscriber = %subscriber, reason = detail, "subscriber left");
            }
            EventKind::MessagePublished => {
                debug!(sequence = e.sequence, detail, "message published");
            }
            EventKind::DeliveryDropped => {
                warn!(subscriber = %subscriber, sequence = e.sequence, "delivery dropped");
            }
            EventKind::ShutdownRequested => {
                info!("shutdown requested");
            }
            EventKind::HubClosed => {
                info!(detail, "hub closed");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }

    fn queue_capacity(&self) -> usize {
        1024
    }
}
