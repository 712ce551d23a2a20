//! # Observers of hub events.
//!
//! This module provides the [`Observe`] trait and the [`ObserverSet`] that feeds
//! observers from the hub's [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Hub ── publish(Event) ──► Bus ──► observer listener ──► ObserverSet::emit
//!                                                                │
//!                                                    ┌───────────┼───────────┐
//!                                                    ▼           ▼           ▼
//!                                                LogWriter    Presence     Custom
//! ```
//!
//! Observers are wired with [`HubBuilder::with_observers`](crate::HubBuilder::with_observers).
//! They see membership and delivery events, never message payloads; read those
//! from a regular subscription.

#[cfg(feature = "logging")]
mod log;
mod observe;
mod set;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use observe::Observe;
pub use set::ObserverSet;
