//! # Custom observer example
//!
//! Tracks presence (how many clients are connected) from hub events, next to
//! the built-in [`LogWriter`].
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example observer --features logging
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicI64, AtomicU64, Ordering},
};

use chathub::{Event, EventKind, Hub, HubConfig, LogWriter, Observe};
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct Presence {
    online: AtomicI64,
    peak: AtomicI64,
    dropped: AtomicU64,
}

impl Presence {
    fn print_stats(&self) {
        println!();
        println!("Presence:");
        println!(" ├─► Online:  {}", self.online.load(Ordering::Relaxed));
        println!(" ├─► Peak:    {}", self.peak.load(Ordering::Relaxed));
        println!(" └─► Dropped: {}", self.dropped.load(Ordering::Relaxed));
    }
}

#[async_trait::async_trait]
impl Observe for Presence {
    async fn on_event(&self, ev: &Event) {
        match ev.kind {
            EventKind::SubscriberAdded => {
                let now = self.online.fetch_add(1, Ordering::Relaxed) + 1;
                self.peak.fetch_max(now, Ordering::Relaxed);
            }
            EventKind::SubscriberRemoved => {
                self.online.fetch_sub(1, Ordering::Relaxed);
            }
            EventKind::DeliveryDropped => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "presence"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let presence = Arc::new(Presence::default());
    let observers: Vec<Arc<dyn Observe>> = vec![Arc::new(LogWriter::new()), presence.clone()];
    let hub = Hub::builder(HubConfig::default().with_mailbox_capacity(2))
        .with_observers(observers)
        .build();

    let subs: Vec<_> = (0..3).map(|_| hub.subscription()).collect::<Result<_, _>>()?;
    for i in 0..4 {
        hub.publish("bot", format!("tick {i}"));
    }
    drop(subs);

    let _lingering = hub.subscription()?;
    hub.shutdown_and_wait().await;

    presence.print_stats();
    Ok(())
}
