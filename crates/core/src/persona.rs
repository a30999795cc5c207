//! Persona — who the assistant speaks as, and the system prompt that
//! enforces it.
//!
//! The prompt is rebuilt fresh for every turn from the persona name and the
//! current knowledge-base text, embedded verbatim. Grounding is enforced
//! purely by instruction: the model is told to answer only from the
//! embedded text and to record anything it cannot answer.

use serde::{Deserialize, Serialize};

/// The person the assistant represents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Display name used throughout the prompt
    pub name: String,
}

impl Persona {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Build the system prompt for one turn.
    ///
    /// The entire knowledge base rides along on every call; the deployment
    /// keeps it small enough that the context window is the only limit.
    pub fn system_prompt(&self, knowledge_text: &str) -> String {
        format!(
            "You are acting as {name}, a professional AI assistant representing {name} on their personal website.\n\
             Your responsibilities include:\n\
             - Answering questions ONLY based on the knowledge base below. Do NOT answer if the information is not contained in the knowledge base.\n\
             - If you do NOT know the answer from the knowledge base, respond: \"I don't know\" and record the question.\n\
             - Engage professionally and politely.\n\
             - Use tools to record unknown questions and user details.\n\
             - NEVER make up information or guess beyond the knowledge base.\n\
             \n\
             Knowledge Base Content:\n\
             {knowledge}\n\
             \n\
             Guidelines:\n\
             - Be professional, friendly, and helpful.\n\
             - Stay strictly on topic about {name}'s professional background.",
            name = self.name,
            knowledge = knowledge_text,
        )
    }
}
