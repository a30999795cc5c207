//! Tool that records a visitor's contact details.
//!
//! The model calls this when a conversation partner shows interest in being
//! contacted and provides an email address. The tool forwards a one-line
//! summary to the operator's notifier and acknowledges to the model.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use vitae_core::error::ToolError;
use vitae_core::notify::Notifier;
use vitae_core::tool::{Tool, ToolResult};

/// Fallback when the visitor did not give a name.
const NAME_NOT_PROVIDED: &str = "Name not provided";

/// Fallback when the model attached no conversation notes.
const NOTES_NOT_PROVIDED: &str = "not provided";

#[derive(Debug, Deserialize)]
struct RecordUserDetailsArgs {
    email: String,
    name: Option<String>,
    notes: Option<String>,
}

pub struct RecordUserDetailsTool {
    notifier: Arc<dyn Notifier>,
}

impl RecordUserDetailsTool {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl Tool for RecordUserDetailsTool {
    fn name(&self) -> &str {
        "record_user_details"
    }

    fn description(&self) -> &str {
        "Use this tool to record that a user is interested in being in touch and provided an email address"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "email": {
                    "type": "string",
                    "description": "The email address of this user"
                },
                "name": {
                    "type": "string",
                    "description": "The user's name, if they provided it"
                },
                "notes": {
                    "type": "string",
                    "description": "Additional context or notes about the conversation"
                }
            },
            "required": ["email"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: RecordUserDetailsArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let name = args.name.as_deref().unwrap_or(NAME_NOT_PROVIDED);
        let notes = args.notes.as_deref().unwrap_or(NOTES_NOT_PROVIDED);

        tracing::info!(email = %args.email, "Recording user details");
        self.notifier
            .notify_best_effort(&format!(
                "Recording {} with email {} and notes {}",
                name, args.email, notes
            ))
            .await;

        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output: serde_json::json!({"recorded": "ok"}).to_string(),
        })
    }
}
