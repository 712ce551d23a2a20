//! # Broadcast hub.
//!
//! This module provides the [`Hub`] and the types handed to its callers:
//! - [`Hub`] owns the subscriber set; `publish`, `subscribe`, `unsubscribe`, `shutdown`
//! - [`HubBuilder`] wires a shared [`MessageLog`](crate::MessageLog) and observers
//! - [`Mailbox`] read side of one subscriber's bounded queue
//! - [`Subscription`] mailbox that unsubscribes itself on drop
//! - [`SubscriberId`] opaque handle used for removal
//! - [`HubStats`] consistent counters snapshot
//!
//! ## Architecture
//! ```text
//!   publisher ──► Hub::publish ──► MessageLog::append
//!                     │
//!                     └──► subscriber set (Mutex<HashMap<SubscriberId, Sender>>)
//!                              ├──► [mailbox] ──► Mailbox / Subscription (connection 1)
//!                              ├──► [mailbox] ──► Mailbox / Subscription (connection 2)
//!                              └──► [mailbox] ──► Mailbox / Subscription (connection N)
//!
//!   every state change ──► Bus ──► Hub::events() / observers
//! ```

mod builder;
mod fanout;
mod handle;
mod mailbox;
mod stats;
mod subscription;

pub use builder::HubBuilder;
pub use fanout::Hub;
pub use handle::SubscriberId;
pub use mailbox::{Mailbox, TryRecvError};
pub use stats::HubStats;
pub use subscription::Subscription;
