//! Hub events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** the hub uses to
//! report its own lifecycle (membership changes, publishes, drops, shutdown).
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publisher**: [`Hub`](crate::Hub) (every state-changing operation).
//! - **Consumers**: [`Hub::events`](crate::Hub::events) receivers and the observer
//!   listener that feeds the [`ObserverSet`](crate::ObserverSet).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
