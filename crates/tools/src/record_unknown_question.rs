//! Tool that records a question the assistant could not answer.
//!
//! Every unanswerable question is a gap in the knowledge base worth knowing
//! about, so the operator gets a push notification with the question text.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use vitae_core::error::ToolError;
use vitae_core::notify::Notifier;
use vitae_core::tool::{Tool, ToolResult};

#[derive(Debug, Deserialize)]
struct RecordUnknownQuestionArgs {
    question: String,
}

pub struct RecordUnknownQuestionTool {
    notifier: Arc<dyn Notifier>,
}

impl RecordUnknownQuestionTool {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl Tool for RecordUnknownQuestionTool {
    fn name(&self) -> &str {
        "record_unknown_question"
    }

    fn description(&self) -> &str {
        "Always use this tool to record any question that couldn't be answered"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "question": {
                    "type": "string",
                    "description": "The question that couldn't be answered"
                }
            },
            "required": ["question"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: RecordUnknownQuestionArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        tracing::info!(question = %args.question, "Recording unknown question");
        self.notifier
            .notify_best_effort(&format!("Recording unknown question: {}", args.question))
            .await;

        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output: serde_json::json!({"recorded": "ok"}).to_string(),
        })
    }
}
