//! # chathub
//!
//! **chathub** is the in-process core of a live chat: clients publish short
//! text messages and every connected client receives them as a stream, without
//! polling.
//!
//! It provides an append-only [`MessageLog`] and a [`Hub`] that fans each
//! published message out to every registered subscriber through a bounded
//! per-subscriber [`Mailbox`]. Transport concerns (HTTP routes, SSE framing,
//! rendering) stay outside; they talk to the hub through five operations.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  publisher   │   │  publisher   │   │  publisher   │
//!     │ (POST form)  │   │ (POST form)  │   │    (bot)     │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Hub                                                              │
//! │  - MessageLog (append-only, assigns sequence numbers)             │
//! │  - subscriber set (Mutex<HashMap<SubscriberId, mailbox sender>>)  │
//! │  - Bus (hub lifecycle events)                                     │
//! └──────┬──────────────────┬──────────────────┬───────────────┬──────┘
//!        ▼                  ▼                  ▼               │
//!   [mailbox 1]        [mailbox 2]        [mailbox N]          │ events
//!   (bounded, 16)      (bounded, 16)      (bounded, 16)        ▼
//!        │                  │                  │        ┌──────────────┐
//!        ▼                  ▼                  ▼        │ ObserverSet  │
//!   connection 1       connection 2       connection N  │ (LogWriter,  │
//!   (event stream)     (event stream)     (event stream)│  custom ...) │
//!                                                       └──────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! Hub::new(cfg) ──► Open
//!
//! subscribe()   ──► (SubscriberId, Mailbox)      Err(Closed) once shut down
//! publish(a, c) ──► append to log ──► try_send to every mailbox
//!                       ├─ Ok     ──► delivered
//!                       ├─ Full   ──► dropped for that subscriber (DeliveryDropped)
//!                       └─ Closed ──► receiver gone, subscriber pruned
//! unsubscribe(id) ──► remove from set ──► close mailbox   (idempotent)
//! shutdown()    ──► Closed: release every mailbox, readers see end of stream
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                      |
//! |-------------------|--------------------------------------------------------------|-----------------------------------------|
//! | **Broadcast**     | Publish once, deliver to every live subscriber.              | [`Hub`], [`HubBuilder`]                 |
//! | **Subscriptions** | Bounded mailboxes, RAII unsubscribe, `Stream` support.       | [`Mailbox`], [`Subscription`]           |
//! | **History**       | Ordered snapshot of everything published.                    | [`MessageLog`], [`Message`]             |
//! | **Events**        | Hub lifecycle events for metrics and audit.                  | [`Event`], [`EventKind`], [`Observe`]   |
//! | **Errors**        | Typed errors for closed hubs and rejected messages.          | [`HubError`]                            |
//! | **Configuration** | Mailbox and bus capacities.                                  | [`HubConfig`]                           |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] observer backed by `tracing`.
//! - `serde`: derives `Serialize` for [`Message`].
//!
//! ## Example
//! ```rust
//! use chathub::{Hub, HubConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), chathub::HubError> {
//!     let hub = Hub::new(HubConfig::default());
//!
//!     let (id, mut mailbox) = hub.subscribe()?;
//!     hub.publish("alice", "hi");
//!
//!     let msg = mailbox.recv().await.expect("delivered");
//!     assert_eq!((msg.author(), msg.content(), msg.sequence()), ("alice", "hi", 0));
//!
//!     hub.unsubscribe(id);
//!     assert_eq!(mailbox.recv().await, None);
//!     assert_eq!(hub.snapshot().len(), 1);
//!     Ok(())
//! }
//! ```
mod config;
mod error;
mod events;
mod hub;
mod log;
mod message;
mod observers;

// ---- Public re-exports ----

pub use config::{Config as HubConfig, DEFAULT_BUS_CAPACITY, DEFAULT_MAILBOX_CAPACITY};
pub use error::HubError;
pub use events::{Bus, Event, EventKind};
pub use hub::{Hub, HubBuilder, HubStats, Mailbox, SubscriberId, Subscription, TryRecvError};
pub use log::MessageLog;
pub use message::Message;
pub use observers::{Observe, ObserverSet};

// Optional: expose a simple built-in logging observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
