//! # ObserverSet: non-blocking fan-out of hub events.
//!
//! Same shape as the hub's own message fan-out, applied to [`Event`]s:
//!
//! ```text
//!    emit(Event)
//!        │                        (Arc-clone per observer)
//!        ├────────────────► [queue O1] ─► worker O1 ─► on_event()
//!        ├────────────────► [queue O2] ─► worker O2 ─► on_event()
//!        └────────────────► [queue ON] ─► worker ON ─► on_event()
//! ```
//!
//! ## Guarantees
//! - `emit` returns immediately (`try_send`).
//! - Per-observer FIFO.
//! - A panicking observer is logged and keeps receiving later events.
//!
//! ## Not guaranteed
//! - Ordering across observers.
//! - Delivery on overflow (the event is dropped for that observer).

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::warn;

use super::Observe;
use crate::events::Event;

struct ObserverChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Per-observer bounded queues and worker tasks.
pub struct ObserverSet {
    channels: Vec<ObserverChannel>,
    workers: Vec<(&'static str, JoinHandle<()>)>,
}

impl ObserverSet {
    /// Creates the set and spawns one worker per observer.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(observers: Vec<Arc<dyn Observe>>) -> Self {
        let mut channels = Vec::with_capacity(observers.len());
        let mut workers = Vec::with_capacity(observers.len());

        for obs in observers {
            let cap = obs.queue_capacity().max(1);
            let name = obs.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(cap);

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = obs.on_event(ev.as_ref());
                    if let Err(panic) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        warn!(
                            observer = obs.name(),
                            panic = %panic_message(panic.as_ref()),
                            "observer panicked"
                        );
                    }
                }
            });

            channels.push(ObserverChannel { name, sender: tx });
            workers.push((name, handle));
        }

        Self { channels, workers }
    }

    /// Hands one event to every observer queue without waiting.
    pub fn emit(&self, event: Event) {
        let ev = Arc::new(event);
        for channel in &self.channels {
            match channel.sender.try_send(Arc::clone(&ev)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(observer = channel.name, seq = ev.seq, "observer queue full; event dropped");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    warn!(observer = channel.name, seq = ev.seq, "observer worker gone; event dropped");
                }
            }
        }
    }

    /// Closes all queues and waits for the workers to finish what is queued.
    pub async fn shutdown(self) {
        drop(self.channels);
        for (name, handle) in self.workers {
            join_worker(name, handle).await;
        }
    }

    /// Number of observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// True if there are no observers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Waits for one worker; a cancelled or aborted worker is logged, not propagated.
async fn join_worker(name: &'static str, handle: JoinHandle<()>) -> bool {
    match handle.await {
        Ok(()) => true,
        Err(err) => {
            warn!(observer = name, error = %err, "observer worker terminated abnormally");
            false
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter(AtomicUsize);

    #[async_trait]
    impl Observe for Counter {
        async fn on_event(&self, _ev: &Event) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
        fn name(&self) -> &'static str {
            "counter"
        }
    }

    struct Panicky;

    #[async_trait]
    impl Observe for Panicky {
        async fn on_event(&self, _ev: &Event) {
            panic!("observer blew up");
        }
        fn name(&self) -> &'static str {
            "panicky"
        }
    }

    #[tokio::test]
    async fn test_panicking_observer_does_not_affect_others() {
        let counter = Arc::new(Counter::default());
        let observers: Vec<Arc<dyn Observe>> = vec![Arc::new(Panicky), counter.clone()];
        let set = ObserverSet::new(observers);
        assert_eq!(set.len(), 2);

        set.emit(Event::new(EventKind::SubscriberAdded));
        set.emit(Event::new(EventKind::HubClosed));
        set.shutdown().await;

        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_aborted_worker_is_reported_not_propagated() {
        let handle = tokio::spawn(std::future::pending::<()>());
        handle.abort();
        assert!(!join_worker("stuck", handle).await);

        let handle = tokio::spawn(async {});
        assert!(join_worker("done", handle).await);
    }

    #[test]
    fn test_panic_message_extracts_strings() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("static");
        assert_eq!(panic_message(boxed.as_ref()), "static");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
