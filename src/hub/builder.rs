use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::Hub;
use crate::{
    config::Config,
    events::{Bus, Event},
    log::MessageLog,
    observers::{Observe, ObserverSet},
};

/// Builder for constructing a [`Hub`] with optional collaborators.
pub struct HubBuilder {
    cfg: Config,
    log: Option<Arc<MessageLog>>,
    observers: Vec<Arc<dyn Observe>>,
}

impl HubBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            log: None,
            observers: Vec::new(),
        }
    }

    /// Uses an existing log instead of creating an empty one.
    ///
    /// Sequence numbers continue from whatever the log already holds.
    pub fn with_log(mut self, log: Arc<MessageLog>) -> Self {
        self.log = Some(log);
        self
    }

    /// Sets observers for hub events.
    ///
    /// Each observer gets a dedicated worker with a bounded queue.
    pub fn with_observers(mut self, observers: Vec<Arc<dyn Observe>>) -> Self {
        self.observers = observers;
        self
    }

    /// Builds the hub.
    ///
    /// Initializes:
    /// - Event bus for hub lifecycle events
    /// - Message log (fresh unless supplied)
    /// - Observer workers and the bus listener feeding them (only if observers were set)
    ///
    /// # Panics
    /// With observers configured, must be called from within a Tokio runtime.
    pub fn build(self) -> Hub {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let log = self.log.unwrap_or_else(MessageLog::shared);
        let runtime_token = CancellationToken::new();
        let drain = self.cfg.observer_drain;

        // Subscribe before the hub exists so no event can slip past the listener.
        let rx = (!self.observers.is_empty()).then(|| bus.subscribe());

        let hub = Hub::from_parts(self.cfg, log, bus, runtime_token.clone());

        if let Some(rx) = rx {
            let set = ObserverSet::new(self.observers);
            hub.set_listener(observer_listener(rx, set, runtime_token, drain));
        }
        hub
    }
}

/// Forwards bus events to the observer set until the hub shuts down.
///
/// On shutdown the listener optionally drains what is already queued on the
/// bus, then closes the observer queues and waits for the workers.
fn observer_listener(
    mut rx: broadcast::Receiver<Event>,
    set: ObserverSet,
    token: CancellationToken,
    drain: bool,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    if drain {
                        loop {
                            match rx.try_recv() {
                                Ok(ev) => set.emit(ev),
                                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                                Err(_) => break,
                            }
                        }
                    }
                    break;
                }
                msg = rx.recv() => match msg {
                    Ok(ev) => set.emit(ev),
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "observer listener lagged; events skipped");
                    }
                },
            }
        }
        set.shutdown().await;
    })
}
