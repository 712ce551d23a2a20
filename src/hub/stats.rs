/// Point-in-time counters of a hub.
///
/// All counters are read under the same lock that guards the subscriber set,
/// so one `HubStats` value is internally consistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubStats {
    /// Subscribers currently registered.
    pub subscribers: usize,
    /// Messages published through this hub.
    pub published: u64,
    /// Successful mailbox deliveries (one per subscriber per message).
    pub delivered: u64,
    /// Deliveries dropped because a mailbox was full.
    pub dropped: u64,
    /// Whether `shutdown` was called.
    pub closed: bool,
}
