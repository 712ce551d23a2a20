//! # Hub configuration.
//!
//! Provides [`Config`] centralized settings for a [`Hub`](crate::Hub).
//!
//! Config is used in two ways:
//! 1. **Hub creation**: `Hub::new(config)` / `Hub::builder(config)`
//! 2. **Per-subscriber setup**: every mailbox is created with
//!    [`Config::mailbox_capacity_clamped`] slots
//!
//! ## Sentinel values
//! - `mailbox_capacity = 0` → treated as 1
//! - `bus_capacity = 0` → treated as 1

/// Default number of pending messages a subscriber mailbox can hold.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 16;

/// Default capacity of the hub event bus ring buffer.
pub const DEFAULT_BUS_CAPACITY: usize = 1024;

/// Configuration for a hub instance.
///
/// ## Field semantics
/// - `mailbox_capacity`: bounded queue size per subscriber (min 1)
/// - `bus_capacity`: hub event ring buffer size (min 1)
/// - `observer_drain`: forward already-published events to observers after shutdown
///
/// All fields are public. Prefer the clamped accessors over reading the raw
/// values so the sentinel checks live in one place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Capacity of each subscriber's mailbox.
    ///
    /// When a mailbox is full, newly published messages are dropped for that
    /// subscriber only. The publisher never waits.
    pub mailbox_capacity: usize,

    /// Capacity of the hub event bus.
    ///
    /// Receivers of [`Hub::events`](crate::Hub::events) that lag behind by more than
    /// this many events observe `Lagged` and skip older items.
    pub bus_capacity: usize,

    /// Whether the observer listener forwards events still queued on the bus
    /// when the hub shuts down, instead of stopping immediately.
    pub observer_drain: bool,
}

impl Config {
    /// Sets the per-subscriber mailbox capacity.
    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }

    /// Sets the event bus capacity.
    pub fn with_bus_capacity(mut self, capacity: usize) -> Self {
        self.bus_capacity = capacity;
        self
    }

    /// Enables or disables draining of queued events to observers on shutdown.
    pub fn with_observer_drain(mut self, drain: bool) -> Self {
        self.observer_drain = drain;
        self
    }

    /// Returns the mailbox capacity clamped to a minimum of 1.
    #[inline]
    pub fn mailbox_capacity_clamped(&self) -> usize {
        self.mailbox_capacity.max(1)
    }

    /// Returns the bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `mailbox_capacity = 16` (absorbs brief consumer slowness)
    /// - `bus_capacity = 1024`
    /// - `observer_drain = true`
    fn default() -> Self {
        Self {
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            bus_capacity: DEFAULT_BUS_CAPACITY,
            observer_drain: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.mailbox_capacity, 16);
        assert_eq!(cfg.bus_capacity, 1024);
        assert!(cfg.observer_drain);
    }

    #[test]
    fn test_zero_capacities_are_clamped() {
        let cfg = Config::default()
            .with_mailbox_capacity(0)
            .with_bus_capacity(0);
        assert_eq!(cfg.mailbox_capacity_clamped(), 1);
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
