//! # Observer trait.
//!
//! Provides [`Observe`], the extension point for reacting to hub events
//! (metrics, audit trails, presence lists) without touching the delivery path.
//!
//! Each observer gets:
//! - **Dedicated worker task** (runs independently)
//! - **Per-observer bounded queue** (capacity via [`Observe::queue_capacity`])
//! - **Panic isolation** (panics are caught and logged)
//!
//! ## Rules
//! - A slow observer only affects its own queue; the hub never waits for it.
//! - Queue overflow drops the event **for this observer only** (logged at warn).
//! - Events are processed sequentially (FIFO) per observer.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use async_trait::async_trait;
//! use chathub::{Event, EventKind, Observe};
//!
//! #[derive(Default)]
//! struct Drops(AtomicU64);
//!
//! #[async_trait]
//! impl Observe for Drops {
//!     async fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::DeliveryDropped) {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "drops" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Hub event observer.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
#[async_trait]
pub trait Observe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from the observer's worker task, never from the publisher.
    async fn on_event(&self, event: &Event);

    /// Name used in logs. The default is the type name; override it with something short.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Capacity of this observer's queue (clamped to a minimum of 1).
    ///
    /// Default: 256.
    fn queue_capacity(&self) -> usize {
        256
    }
}
