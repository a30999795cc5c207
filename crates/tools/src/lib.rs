//! Built-in tool implementations for Vitae.
//!
//! The assistant deliberately exposes only two tools to the model, both of
//! which turn conversation events into operator notifications: recording a
//! visitor who left an email address, and recording a question the model
//! could not answer from its knowledge base.

pub mod record_unknown_question;
pub mod record_user_details;

use std::sync::Arc;

use vitae_core::{Notifier, ToolRegistry};

pub use record_unknown_question::RecordUnknownQuestionTool;
pub use record_user_details::RecordUserDetailsTool;

/// Create the default tool registry with both recording tools wired to the
/// given notifier.
pub fn default_registry(notifier: Arc<dyn Notifier>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(RecordUserDetailsTool::new(Arc::clone(&notifier))));
    registry.register(Box::new(RecordUnknownQuestionTool::new(notifier)));
    registry
}
