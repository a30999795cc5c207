//! Notifier trait — the abstraction over operator push notifications.
//!
//! A Notifier carries a short free-text message to whoever operates the
//! assistant: "someone left their email", "someone asked a question I
//! could not answer". Delivery is best-effort and fire-and-forget; callers
//! log failures and move on, they never fail a turn over one.

use crate::error::NotifyError;
use async_trait::async_trait;

/// The core Notifier trait.
///
/// Implementations handle the concrete transport. No response body is ever
/// consumed and no ordering between concurrent notifications is promised.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Human-readable transport name (e.g., "pushover", "log").
    fn name(&self) -> &str;

    /// Deliver one message.
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;

    /// Deliver one message, logging any failure instead of returning it.
    ///
    /// This is what the tools and the contact form call: a lost
    /// notification is worth a warning, not a failed turn.
    async fn notify_best_effort(&self, message: &str) {
        if let Err(e) = self.notify(message).await {
            tracing::warn!(notifier = self.name(), error = %e, "Notification delivery failed");
        }
    }
}
