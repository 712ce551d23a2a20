//! Error types returned by the hub.
//!
//! [`HubError`] covers the two designed failure paths:
//!
//! - [`HubError::Closed`]: `subscribe` after `shutdown`.
//! - [`HubError::InvalidMessage`]: upstream validation rejected a publish
//!   (see [`Hub::try_publish`](crate::Hub::try_publish)).
//!
//! Unsubscribing an unknown handle and dropping a message for a full mailbox are
//! **not** errors. Helper methods (`as_label`, `as_message`) follow the same shape
//! as [`EventKind::as_label`](crate::EventKind::as_label) for logs/metrics.

use thiserror::Error;

/// # Errors produced by the hub.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HubError {
    /// The hub was shut down; no new subscriptions are accepted.
    ///
    /// Callers should treat this as "service unavailable" and not retry
    /// against the same hub instance.
    #[error("hub is closed")]
    Closed,

    /// The message failed validation before it reached the log.
    #[error("invalid message: {reason}")]
    InvalidMessage {
        /// What was wrong with the message.
        reason: String,
    },
}

impl HubError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use chathub::HubError;
    ///
    /// assert_eq!(HubError::Closed.as_label(), "hub_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HubError::Closed => "hub_closed",
            HubError::InvalidMessage { .. } => "invalid_message",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HubError::Closed => "hub closed; subscriptions unavailable".to_string(),
            HubError::InvalidMessage { reason } => format!("rejected: {reason}"),
        }
    }

    /// Indicates whether retrying against the same hub could succeed.
    ///
    /// Always `false`: a closed hub stays closed and an invalid message stays invalid.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(HubError::Closed.as_label(), "hub_closed");
        let err = HubError::InvalidMessage {
            reason: "empty author".into(),
        };
        assert_eq!(err.as_label(), "invalid_message");
        assert_eq!(err.as_message(), "rejected: empty author");
        assert_eq!(err.to_string(), "invalid message: empty author");
    }

    #[test]
    fn test_never_retryable() {
        assert!(!HubError::Closed.is_retryable());
    }
}
