//! The notification sink contract.
//!
//! Delivery (panel toast, Telegram, email) is external. Sink failures
//! are logged and swallowed; they never roll back the transaction
//! mutation they follow.

use kasira_shared::types::ActorId;
use std::fmt;
use thiserror::Error;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Operation succeeded.
    Success,
    /// Operation succeeded with a caveat.
    Warning,
    /// Operation was rejected or failed.
    Danger,
}

impl NotificationLevel {
    /// Returns the string representation of the level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors surfaced by a notification sink.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The message could not be delivered.
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Fire-and-forget delivery contract consumed by the engine.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink {
    /// Delivers a message to a recipient.
    fn notify(
        &self,
        recipient: ActorId,
        message: &str,
        level: NotificationLevel,
    ) -> Result<(), NotifyError>;
}

/// Sink that writes notifications to the tracing log.
#[derive(Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(
        &self,
        recipient: ActorId,
        message: &str,
        level: NotificationLevel,
    ) -> Result<(), NotifyError> {
        match level {
            NotificationLevel::Success => {
                tracing::info!(%recipient, level = %level, "{message}");
            }
            NotificationLevel::Warning | NotificationLevel::Danger => {
                tracing::warn!(%recipient, level = %level, "{message}");
            }
        }
        Ok(())
    }
}
