use std::sync::Arc;

use async_trait::async_trait;
use chathub::{Event, EventKind, Hub, HubConfig, Observe};
use parking_lot::Mutex;

#[derive(Default)]
struct Recorder {
    kinds: Mutex<Vec<EventKind>>,
}

impl Recorder {
    fn kinds(&self) -> Vec<EventKind> {
        self.kinds.lock().clone()
    }

    fn count(&self, kind: EventKind) -> usize {
        self.kinds.lock().iter().filter(|k| **k == kind).count()
    }
}

#[async_trait]
impl Observe for Recorder {
    async fn on_event(&self, ev: &Event) {
        self.kinds.lock().push(ev.kind);
    }

    fn name(&self) -> &'static str {
        "recorder"
    }
}

struct Exploding;

#[async_trait]
impl Observe for Exploding {
    async fn on_event(&self, ev: &Event) {
        if ev.kind == EventKind::MessagePublished {
            panic!("cannot handle publishes");
        }
    }

    fn name(&self) -> &'static str {
        "exploding"
    }
}

#[tokio::test]
async fn test_observers_see_the_hub_lifecycle() {
    let recorder = Arc::new(Recorder::default());
    let hub = Hub::builder(HubConfig::default().with_mailbox_capacity(1))
        .with_observers(vec![recorder.clone() as Arc<dyn Observe>])
        .build();

    let (id, _mailbox) = hub.subscribe().expect("subscribe");
    hub.publish("alice", "one");
    hub.publish("alice", "two");
    hub.unsubscribe(id);
    hub.shutdown_and_wait().await;

    assert_eq!(
        recorder.kinds(),
        vec![
            EventKind::SubscriberAdded,
            EventKind::MessagePublished,
            EventKind::DeliveryDropped,
            EventKind::MessagePublished,
            EventKind::SubscriberRemoved,
            EventKind::ShutdownRequested,
            EventKind::HubClosed,
        ]
    );
}

#[tokio::test]
async fn test_panicking_observer_is_isolated() {
    let recorder = Arc::new(Recorder::default());
    let observers: Vec<Arc<dyn Observe>> = vec![Arc::new(Exploding), recorder.clone()];
    let hub = Hub::builder(HubConfig::default())
        .with_observers(observers)
        .build();

    for i in 0..3 {
        hub.publish("bob", format!("{i}"));
    }
    let (_, mut mailbox) = hub.subscribe().expect("subscribe");
    hub.publish("bob", "3");
    assert_eq!(mailbox.recv().await.map(|m| m.sequence()), Some(3));

    hub.shutdown_and_wait().await;
    assert_eq!(recorder.count(EventKind::MessagePublished), 4);
    assert_eq!(recorder.count(EventKind::SubscriberRemoved), 1);
}

#[tokio::test]
async fn test_events_receiver_reports_removal_reasons() {
    let hub = Hub::new(HubConfig::default());
    let mut events = hub.events();

    let (a, _ma) = hub.subscribe().expect("subscribe");
    let (b, mb) = hub.subscribe().expect("subscribe");
    let (c, _mc) = hub.subscribe().expect("subscribe");

    hub.unsubscribe(a);
    drop(mb);
    hub.publish("carol", "prune");
    hub.shutdown();

    let mut removals = Vec::new();
    while let Ok(ev) = events.try_recv() {
        if ev.kind == EventKind::SubscriberRemoved {
            removals.push((ev.subscriber.expect("subscriber set"), ev.reason.expect("reason")));
        }
    }

    let reasons: Vec<(_, &str)> = removals.iter().map(|(id, r)| (*id, &**r)).collect();
    assert_eq!(reasons, vec![(a, "unsubscribe"), (b, "closed"), (c, "shutdown")]);
}

#[tokio::test]
async fn test_drain_disabled_discards_queued_events() {
    let recorder = Arc::new(Recorder::default());
    let hub = Hub::builder(HubConfig::default().with_observer_drain(false))
        .with_observers(vec![recorder.clone() as Arc<dyn Observe>])
        .build();

    // Single-threaded runtime: the listener has not run yet when shutdown cancels it.
    hub.publish("dave", "x");
    hub.shutdown_and_wait().await;

    assert!(recorder.kinds().is_empty());
    assert_eq!(hub.snapshot().len(), 1);
}
