//! # Chat room simulation
//!
//! Plays the role of the transport layer: a few "connections" subscribe and
//! render every message as an event-stream line, a couple of users post, one
//! connection stalls and misses messages, and the room shuts down at the end.
//!
//! ## Run
//! ```bash
//! RUST_LOG=chathub=debug cargo run --example chat --features serde
//! ```

use std::time::Duration;

use chathub::{Hub, HubConfig, Message, Subscription};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// One connected client: prints every message until the hub closes the stream.
async fn connection(name: &'static str, mut sub: Subscription, delay: Duration) -> usize {
    let mut received = 0;
    while let Some(msg) = sub.recv().await {
        received += 1;
        match frame(&msg) {
            Ok(line) => println!("[{name}] {line}"),
            Err(err) => warn!(connection = name, sequence = msg.sequence(), error = %err, "cannot frame message"),
        }
        tokio::time::sleep(delay).await;
    }
    println!("[{name}] stream closed after {received} messages");
    received
}

/// Event-stream framing as a browser `EventSource` would consume it.
fn frame(msg: &Message) -> serde_json::Result<String> {
    Ok(format!("id: {}\ndata: {}\n", msg.sequence(), serde_json::to_string(msg)?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let hub = Hub::new(HubConfig::default().with_mailbox_capacity(4));

    let fast = tokio::spawn(connection("fast", hub.subscription()?, Duration::ZERO));
    let slow = tokio::spawn(connection(
        "slow",
        hub.subscription()?,
        Duration::from_millis(50),
    ));

    for (i, author) in ["alice", "bob", "carol"].iter().cycle().take(12).enumerate() {
        hub.try_publish(author, &format!("message #{i}"))?;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    // A late joiner renders the history first, then follows the live stream.
    let late = hub.subscription()?;
    for msg in hub.snapshot() {
        println!("[late/backfill] {msg}");
    }
    let late = tokio::spawn(connection("late", late, Duration::ZERO));
    hub.publish("alice", "welcome!");

    tokio::time::sleep(Duration::from_millis(100)).await;
    println!("stats before shutdown: {:?}", hub.stats());
    hub.shutdown();

    let (fast, slow, late) = (fast.await?, slow.await?, late.await?);
    println!("received: fast={fast} slow={slow} late={late}");
    println!("final stats: {:?}", hub.stats());
    Ok(())
}
