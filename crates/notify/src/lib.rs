//! Operator push notifications for vitae.
//!
//! Two implementations of the `Notifier` trait: `PushoverNotifier` posts to
//! the Pushover message API, `LogNotifier` stands in when no credentials
//! are configured so the rest of the system behaves identically either way.

use async_trait::async_trait;
use tracing::{debug, info};
use vitae_core::error::NotifyError;
use vitae_core::notify::Notifier;

/// The Pushover message endpoint.
pub const PUSHOVER_API_URL: &str = "https://api.pushover.net/1/messages.json";

/// Delivers messages through the Pushover push-notification service.
///
/// One URL-encoded form POST per message: `token`, `user`, `message`.
/// The response body is never consumed beyond the status code.
pub struct PushoverNotifier {
    token: String,
    user: String,
    api_url: String,
    client: reqwest::Client,
}

impl PushoverNotifier {
    pub fn new(token: impl Into<String>, user: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            token: token.into(),
            user: user.into(),
            api_url: PUSHOVER_API_URL.into(),
            client,
        }
    }

    /// Override the API endpoint (for tests).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

impl std::fmt::Debug for PushoverNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushoverNotifier")
            .field("token", &"[REDACTED]")
            .field("user", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    fn name(&self) -> &str {
        "pushover"
    }

    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let params = [
            ("token", self.token.as_str()),
            ("user", self.user.as_str()),
            ("message", message),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| NotifyError::DeliveryFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::BadStatus {
                status: status.as_u16(),
            });
        }

        debug!(chars = message.len(), "Pushover notification delivered");
        Ok(())
    }
}

/// Fallback notifier that writes the message to the log.
///
/// Used when Pushover credentials are absent, so notifications still leave
/// a visible trace during development.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        info!(message = %message, "Notification (log only)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_credentials() {
        let notifier = PushoverNotifier::new("app-token-secret", "user-key-secret");
        let debug = format!("{notifier:?}");
        assert!(!debug.contains("app-token-secret"));
        assert!(!debug.contains("user-key-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_endpoint_is_pushover() {
        let notifier = PushoverNotifier::new("t", "u");
        assert_eq!(notifier.api_url, PUSHOVER_API_URL);
        assert_eq!(notifier.name(), "pushover");
    }

    #[test]
    fn endpoint_override_for_tests() {
        let notifier = PushoverNotifier::new("t", "u").with_api_url("http://127.0.0.1:1/push");
        assert_eq!(notifier.api_url, "http://127.0.0.1:1/push");
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_delivery_failure() {
        // Port 1 on loopback refuses connections immediately
        let notifier = PushoverNotifier::new("t", "u").with_api_url("http://127.0.0.1:1/push");
        let err = notifier.notify("hello").await.unwrap_err();
        assert!(matches!(err, NotifyError::DeliveryFailed(_)));
    }

    #[tokio::test]
    async fn log_notifier_always_succeeds() {
        let notifier = LogNotifier;
        assert!(notifier.notify("Recording unknown question: ?").await.is_ok());
        assert_eq!(notifier.name(), "log");
    }
}
