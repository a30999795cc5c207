//! HTTP presentation layer for Vitae.
//!
//! Serves the embedded chat UI, a health endpoint, and the JSON API the UI
//! talks to: one chat endpoint that drives engine turns against per-session
//! conversations, and one contact endpoint for visitors who only want to
//! leave an email address.
//!
//! Built on Axum. Sessions are in-memory only; a restart starts everyone
//! fresh.

pub mod api;
pub mod frontend;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{Json, Router, http::header, routing::get};
use serde::Serialize;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use vitae_agent::Assistant;
use vitae_core::message::Conversation;
use vitae_core::notify::Notifier;

/// Shared application state for the gateway.
pub struct GatewayState {
    /// The conversation engine all sessions share
    pub assistant: Assistant,

    /// Transport for contact notifications fired by the handlers themselves
    pub notifier: Arc<dyn Notifier>,

    /// Per-session transcripts, keyed by session id
    pub sessions: RwLock<HashMap<String, Conversation>>,
}

pub type SharedState = Arc<GatewayState>;

impl GatewayState {
    pub fn new(assistant: Assistant, notifier: Arc<dyn Notifier>) -> SharedState {
        Arc::new(Self {
            assistant,
            notifier,
            sessions: RwLock::new(HashMap::new()),
        })
    }
}

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::api_router())
        .merge(frontend::frontend_router())
        .with_state(state)
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server on the given address.
pub async fn serve(
    host: &str,
    port: u16,
    state: SharedState,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{host}:{port}");
    let app = build_router(state);

    info!(addr = %addr, "Gateway listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
pub(crate) mod test_support;
