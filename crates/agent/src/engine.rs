//! The bounded tool-calling loop implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};
use vitae_core::error::EngineError;
use vitae_core::message::{Message, Role};
use vitae_core::persona::Persona;
use vitae_core::provider::{Provider, ProviderRequest};
use vitae_core::tool::{ToolCall, ToolRegistry};
use vitae_knowledge::KnowledgeBase;

/// Phrases that mark a final answer as a non-answer.
///
/// Matched case-insensitively as substrings. The model is instructed to say
/// "I don't know" for questions outside its knowledge base, but it phrases
/// that refusal in several ways.
const DONT_KNOW_PHRASES: [&str; 4] = [
    "i don't know",
    "cannot answer",
    "not in my knowledge base",
    "no information",
];

/// Reply shown to the visitor when a turn runs out of tool rounds.
///
/// Must never match [`is_dont_know`], or the substitute reply would record
/// a spurious unknown question.
pub const FALLBACK_ANSWER: &str =
    "I seem to have gotten stuck on that one. Could you rephrase your question?";

/// Whether an answer amounts to "I don't know".
pub fn is_dont_know(answer: &str) -> bool {
    let lowered = answer.to_lowercase();
    DONT_KNOW_PHRASES.iter().any(|p| lowered.contains(p))
}

/// The conversation engine that drives one assistant turn at a time.
///
/// Holds no per-visitor state; callers own their transcripts and pass the
/// prior turns into [`Assistant::respond`].
pub struct Assistant {
    /// The remote model client
    provider: Arc<dyn Provider>,

    /// The registered tools, described to the model on every call
    tools: Arc<ToolRegistry>,

    /// Whose voice the assistant speaks in
    persona: Persona,

    /// The document text embedded into every system prompt
    knowledge: Arc<KnowledgeBase>,

    /// The model to request
    model: String,

    /// Sampling temperature
    temperature: f32,

    /// Maximum model calls per turn before the loop gives up
    max_tool_rounds: usize,
}

impl Assistant {
    pub fn new(
        provider: Arc<dyn Provider>,
        tools: Arc<ToolRegistry>,
        persona: Persona,
        knowledge: Arc<KnowledgeBase>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            tools,
            persona,
            knowledge,
            model: model.into(),
            temperature: 0.7,
            max_tool_rounds: 8,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum number of model calls per turn.
    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    /// The name the assistant answers as.
    pub fn persona_name(&self) -> &str {
        &self.persona.name
    }

    /// Run one turn: the visitor's new message against their prior transcript.
    ///
    /// `prior_turns` is replayed as role + text only. Tool-call bookkeeping
    /// from earlier turns never reaches the wire again; the remote API
    /// rejects dangling tool references, so they are structurally absent
    /// rather than filtered at serialization time.
    ///
    /// On success the final answer text is returned. The caller owns the
    /// transcript and decides what to append; a failed turn leaves nothing
    /// for it to record.
    pub async fn respond(
        &self,
        user_message: &str,
        prior_turns: &[Message],
    ) -> Result<String, EngineError> {
        if user_message.trim().is_empty() {
            return Err(EngineError::EmptyMessage);
        }

        let mut messages = Vec::with_capacity(prior_turns.len() + 2);
        messages.push(Message::system(
            self.persona.system_prompt(&self.knowledge.text),
        ));
        for turn in prior_turns {
            match turn.role {
                Role::User => messages.push(Message::user(&turn.content)),
                Role::Assistant => messages.push(Message::assistant(&turn.content)),
                Role::System | Role::Tool => {}
            }
        }
        messages.push(Message::user(user_message));

        let tool_definitions = self.tools.definitions();
        let mut round = 0;

        let answer = loop {
            round += 1;
            if round > self.max_tool_rounds {
                warn!(
                    rounds = self.max_tool_rounds,
                    "Tool-call loop ran out of rounds without a final answer"
                );
                return Err(EngineError::LoopBoundExceeded {
                    rounds: self.max_tool_rounds,
                });
            }

            debug!(round, messages = messages.len(), "Engine round");

            let request = ProviderRequest {
                model: self.model.clone(),
                messages: messages.clone(),
                temperature: self.temperature,
                max_tokens: None,
                tools: tool_definitions.clone(),
            };

            let response = self.provider.complete(request).await?;

            if !response.message.requests_tools() {
                break response.message.content;
            }

            debug!(
                tool_count = response.message.tool_calls.len(),
                "Executing tool calls"
            );

            let tool_calls = response.message.tool_calls.clone();
            messages.push(response.message);

            for tc in &tool_calls {
                let output = match serde_json::from_str(&tc.arguments) {
                    Ok(arguments) => {
                        let call = ToolCall {
                            id: tc.id.clone(),
                            name: tc.name.clone(),
                            arguments,
                        };
                        match self.tools.execute(&call).await {
                            Ok(result) => result.output,
                            Err(e) => {
                                warn!(tool = %tc.name, error = %e, "Tool execution failed");
                                format!("Error: {e}")
                            }
                        }
                    }
                    Err(e) => {
                        warn!(tool = %tc.name, error = %e, "Malformed tool arguments");
                        format!("Error: invalid tool arguments: {e}")
                    }
                };
                messages.push(Message::tool_result(&tc.id, output));
            }
        };

        if is_dont_know(&answer) {
            self.record_unanswered(user_message).await;
        }

        Ok(answer)
    }

    /// Post-hoc safety net: record the question even when the model said
    /// "I don't know" in prose without formally calling the tool. Runs once
    /// per turn; a prior model-invoked call in the same turn is not
    /// deduplicated against.
    async fn record_unanswered(&self, question: &str) {
        info!("Final answer reads as a non-answer, recording the question");
        let call = ToolCall {
            id: String::new(),
            name: "record_unknown_question".into(),
            arguments: serde_json::json!({ "question": question }),
        };
        if let Err(e) = self.tools.execute(&call).await {
            warn!(error = %e, "Could not record the unanswered question");
        }
    }
}
