//! Error types for the vitae domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; everything a turn can fail
//! with is scoped to that turn, never the whole process.

use thiserror::Error;

/// The top-level error type for vitae operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("Notification endpoint returned status {status}")]
    BadStatus { status: u16 },
}

/// Errors a single conversation turn can end with.
///
/// All of these are recoverable from the caller's point of view: the turn
/// failed but the accumulated history is untouched, so a retry is safe.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Tool-call loop exceeded {rounds} rounds without a final answer")]
    LoopBoundExceeded { rounds: usize },

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn tool_error_displays_correctly() {
        let err = Error::Tool(ToolError::InvalidArguments(
            "missing field `email`".into(),
        ));
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn engine_error_reports_round_bound() {
        let err = EngineError::LoopBoundExceeded { rounds: 8 };
        assert!(err.to_string().contains("8 rounds"));
    }
}
