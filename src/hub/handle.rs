use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide handle counter shared by every hub.
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque handle identifying one subscription.
///
/// Handles are unique across every hub in the process and never reused, so a
/// handle from one hub is always unknown to another. Two subscriptions opened
/// by the same user get two distinct handles; the hub does not deduplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// Allocates the next unused handle.
    pub(crate) fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Numeric value, for logs and metrics labels.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_never_repeats() {
        let a = SubscriberId::next();
        let b = SubscriberId::next();
        assert_ne!(a, b);
        assert!(b.as_u64() > a.as_u64());
    }
}
