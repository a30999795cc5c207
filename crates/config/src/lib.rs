//! Configuration loading and validation for vitae.
//!
//! Loads configuration from `vitae.toml` (or a path given via `--config` /
//! `VITAE_CONFIG`) with environment variable overrides for secrets.
//! A missing file is not an error: every setting has a default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `vitae.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote model endpoint settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Who the assistant speaks as
    #[serde(default)]
    pub persona: PersonaConfig,

    /// Knowledge-base document paths
    #[serde(default)]
    pub documents: DocumentsConfig,

    /// Conversation engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Push-notification credentials
    #[serde(default)]
    pub pushover: PushoverConfig,

    /// HTTP gateway settings
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("provider", &self.provider)
            .field("persona", &self.persona)
            .field("documents", &self.documents)
            .field("engine", &self.engine)
            .field("pushover", &self.pushover)
            .field("gateway", &self.gateway)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key; falls back to `VITAE_API_KEY` then `GROQ_API_KEY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// OpenAI-compatible endpoint base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".into()
}
fn default_model() -> String {
    "llama-3.3-70b-versatile".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// The name the assistant represents
    #[serde(default = "default_persona_name")]
    pub name: String,
}

fn default_persona_name() -> String {
    "Manova".into()
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: default_persona_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsConfig {
    /// PDF documents, extracted page by page
    #[serde(default = "default_pdfs")]
    pub pdfs: Vec<String>,

    /// Plain-text documents, read whole
    #[serde(default = "default_texts")]
    pub texts: Vec<String>,

    /// Image paths, checked for existence only
    #[serde(default = "default_images")]
    pub images: Vec<String>,
}

fn default_pdfs() -> Vec<String> {
    vec!["me/cv.pdf".into()]
}
fn default_texts() -> Vec<String> {
    vec!["me/summary.txt".into()]
}
fn default_images() -> Vec<String> {
    vec!["me/profile.png".into()]
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            pdfs: default_pdfs(),
            texts: default_texts(),
            images: default_images(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum tool rounds per turn before the loop gives up
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: usize,
}

fn default_max_tool_rounds() -> usize {
    8
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_tool_rounds: default_max_tool_rounds(),
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct PushoverConfig {
    /// Application token; falls back to `PUSHOVER_TOKEN`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// User key; falls back to `PUSHOVER_USER`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl PushoverConfig {
    /// Both credentials present, so real push delivery is possible.
    pub fn is_configured(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

impl std::fmt::Debug for PushoverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushoverConfig")
            .field("token", &redact(&self.token))
            .field("user", &redact(&self.user))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8080
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path.
    ///
    /// The path is `$VITAE_CONFIG` if set, otherwise `vitae.toml` in the
    /// working directory. Environment variables then fill in any secrets
    /// the file left out:
    /// - `VITAE_API_KEY`, then `GROQ_API_KEY`, for the model API key
    /// - `PUSHOVER_TOKEN` / `PUSHOVER_USER` for notification credentials
    /// - `VITAE_MODEL` overrides the model identifier
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("VITAE_CONFIG").unwrap_or_else(|_| "vitae.toml".into());
        Self::load_from(Path::new(&path))
    }

    /// Load configuration from a specific file path, then apply environment
    /// overrides and validate.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read_file(path)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    fn apply_env(&mut self) {
        if self.provider.api_key.is_none() {
            self.provider.api_key = std::env::var("VITAE_API_KEY")
                .ok()
                .or_else(|| std::env::var("GROQ_API_KEY").ok());
        }
        if let Ok(model) = std::env::var("VITAE_MODEL") {
            self.provider.model = model;
        }
        if self.pushover.token.is_none() {
            self.pushover.token = std::env::var("PUSHOVER_TOKEN").ok();
        }
        if self.pushover.user.is_none() {
            self.pushover.user = std::env::var("PUSHOVER_USER").ok();
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(ConfigError::ValidationError(
                "provider.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.model must not be empty".into(),
            ));
        }
        if self.provider.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "provider.request_timeout_secs must be at least 1".into(),
            ));
        }
        if self.engine.max_tool_rounds == 0 {
            return Err(ConfigError::ValidationError(
                "engine.max_tool_rounds must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Check if a model API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.provider.api_key.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            persona: PersonaConfig::default(),
            documents: DocumentsConfig::default(),
            engine: EngineConfig::default(),
            pushover: PushoverConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
