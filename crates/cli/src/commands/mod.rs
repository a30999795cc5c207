//! Subcommand implementations and the wiring they share.
//!
//! `serve` and `chat` assemble the same assistant from configuration, so
//! the assembly steps live here and the commands stay thin. `doctor`
//! reuses the individual pieces to report on each one separately.

pub mod chat;
pub mod doctor;
pub mod serve;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use vitae_agent::Assistant;
use vitae_config::AppConfig;
use vitae_core::notify::Notifier;
use vitae_core::persona::Persona;
use vitae_knowledge::{DocumentSet, KnowledgeBase};
use vitae_notify::{LogNotifier, PushoverNotifier};
use vitae_providers::OpenAiCompatProvider;

/// Load configuration from `--config`, `$VITAE_CONFIG`, or `vitae.toml`.
pub(crate) fn load_config(path: Option<PathBuf>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => AppConfig::load_from(&path)?,
        None => AppConfig::load()?,
    };
    Ok(config)
}

/// Turn the configured document path strings into a `DocumentSet`.
pub(crate) fn document_set(config: &AppConfig) -> DocumentSet {
    DocumentSet::new(
        config.documents.pdfs.iter().map(PathBuf::from).collect(),
        config.documents.texts.iter().map(PathBuf::from).collect(),
        config.documents.images.iter().map(PathBuf::from).collect(),
    )
}

/// Pick the notifier: Pushover when credentials are present, log-only otherwise.
pub(crate) fn build_notifier(config: &AppConfig) -> Arc<dyn Notifier> {
    match (&config.pushover.token, &config.pushover.user) {
        (Some(token), Some(user)) => Arc::new(PushoverNotifier::new(token.clone(), user.clone())),
        _ => {
            info!("Pushover not configured, notifications go to the log");
            Arc::new(LogNotifier)
        }
    }
}

/// Assemble the assistant: documents, provider, tools, persona.
pub(crate) fn build_assistant(
    config: &AppConfig,
    notifier: Arc<dyn Notifier>,
) -> Result<Assistant, Box<dyn std::error::Error>> {
    // Check for API key early — give a clear error
    let Some(api_key) = config.provider.api_key.clone() else {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    GROQ_API_KEY=gsk_...     (recommended)");
        eprintln!("    VITAE_API_KEY=...        (generic)");
        eprintln!();
        eprintln!("  Or add it to vitae.toml under [provider]:");
        eprintln!("    api_key = \"gsk_...\"");
        eprintln!();
        eprintln!("  Get a Groq key at: https://console.groq.com/keys");
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    };

    let documents = document_set(config);
    let knowledge = KnowledgeBase::load(&documents);
    if knowledge.is_empty() {
        warn!("Knowledge base is empty, the assistant has no documents to draw on");
    }

    let provider = Arc::new(
        OpenAiCompatProvider::new("groq", &config.provider.base_url, api_key)
            .with_timeout(Duration::from_secs(config.provider.request_timeout_secs)),
    );

    let tools = Arc::new(vitae_tools::default_registry(notifier));

    let assistant = Assistant::new(
        provider,
        tools,
        Persona::new(config.persona.name.clone()),
        Arc::new(knowledge),
        config.provider.model.clone(),
    )
    .with_temperature(config.provider.temperature)
    .with_max_tool_rounds(config.engine.max_tool_rounds);

    Ok(assistant)
}
