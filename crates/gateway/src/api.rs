//! The JSON endpoints behind the chat UI.
//!
//! `/api/chat` drives one engine turn per request against a per-session
//! conversation. `/api/contact` records a visitor's email without any chat.
//! Both record contact details through the same tool the model itself
//! calls, so the notification text is identical no matter who triggered it.

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use vitae_agent::FALLBACK_ANSWER;
use vitae_core::error::EngineError;
use vitae_core::message::{Conversation, ConversationId, Message};
use vitae_core::tool::Tool;
use vitae_tools::RecordUserDetailsTool;

use crate::SharedState;

/// Maximum number of in-memory sessions before the oldest is evicted.
const MAX_SESSIONS: usize = 1_000;

/// Reply when the visitor submits an empty message.
const EMPTY_MESSAGE_REPLY: &str = "Please type a message first.";

/// Reply when the model call failed outright.
const TRY_AGAIN_REPLY: &str =
    "Sorry, I hit a problem answering that. Please try again in a moment.";

/// Build the /api router. Nest this under "/api" in the main router.
pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/contact", post(contact_handler))
}

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Deserialize)]
struct ChatRequest {
    /// Existing session ID (omit to start a new session).
    #[serde(default)]
    session_id: Option<String>,
    /// The visitor's message.
    message: String,
    /// Optional contact name from the sidebar form.
    #[serde(default)]
    name: Option<String>,
    /// Optional contact email from the sidebar form.
    #[serde(default)]
    email: Option<String>,
}

#[derive(Serialize)]
struct ChatResponse {
    session_id: String,
    reply: String,
}

#[derive(Deserialize)]
struct ContactRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Serialize)]
struct ContactResponse {
    status: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let session_id = payload
        .session_id
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| ConversationId::new().to_string());

    // Empty message: no model call, no history change.
    if payload.message.trim().is_empty() {
        return Json(ChatResponse {
            session_id,
            reply: EMPTY_MESSAGE_REPLY.into(),
        });
    }

    info!(session = %session_id, "api/chat request");

    // Snapshot the prior turns; the lock is not held across the model call.
    let prior_turns = {
        let mut sessions = state.sessions.write().await;

        // Evict the oldest session if at capacity
        if sessions.len() >= MAX_SESSIONS && !sessions.contains_key(&session_id) {
            if let Some(oldest_key) = sessions
                .iter()
                .min_by_key(|(_, c)| c.created_at)
                .map(|(k, _)| k.clone())
            {
                sessions.remove(&oldest_key);
            }
        }

        let conv = sessions
            .entry(session_id.clone())
            .or_insert_with(Conversation::new);
        conv.messages.clone()
    };

    let reply = match state.assistant.respond(&payload.message, &prior_turns).await {
        Ok(answer) => {
            let mut sessions = state.sessions.write().await;
            if let Some(conv) = sessions.get_mut(&session_id) {
                conv.push(Message::user(&payload.message));
                conv.push(Message::assistant(&answer));
            }
            answer
        }
        Err(EngineError::EmptyMessage) => EMPTY_MESSAGE_REPLY.into(),
        Err(e @ EngineError::LoopBoundExceeded { .. }) => {
            warn!(session = %session_id, error = %e, "Turn gave no final answer");
            FALLBACK_ANSWER.into()
        }
        Err(EngineError::Provider(e)) => {
            error!(session = %session_id, error = %e, "Model call failed");
            TRY_AGAIN_REPLY.into()
        }
    };

    // A visitor who filled in the contact fields gets recorded alongside
    // the chat, with the message as context.
    if let Some(email) = non_empty(payload.email.as_deref()) {
        record_contact(
            &state,
            payload.name.as_deref(),
            email,
            format!("From chat: {}", payload.message),
        )
        .await;
    }

    Json(ChatResponse { session_id, reply })
}

async fn contact_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Some(email) = non_empty(payload.email.as_deref()) else {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: "❗ Please enter your email.".into(),
            }),
        ));
    };

    record_contact(
        &state,
        payload.name.as_deref(),
        email,
        "Submitted via contact form".to_string(),
    )
    .await;

    Ok(Json(ContactResponse {
        status: "Thank you! Contact info recorded.".into(),
    }))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Record contact details through the registered tool implementation.
/// Name defaulting ("Name not provided") lives in the tool, not here.
async fn record_contact(state: &SharedState, name: Option<&str>, email: &str, notes: String) {
    let tool = RecordUserDetailsTool::new(Arc::clone(&state.notifier));
    let mut args = serde_json::json!({ "email": email, "notes": notes });
    if let Some(name) = non_empty(name) {
        args["name"] = name.into();
    }
    if let Err(e) = tool.execute(args).await {
        warn!(error = %e, "Could not record contact details");
    }
}
