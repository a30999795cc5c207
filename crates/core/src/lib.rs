//! # Vitae Core
//!
//! Domain types, traits, and error definitions for the vitae assistant.
//! This crate has **zero framework dependencies** — it defines the domain
//! model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (the remote model, the push-notification
//! transport, the registered tools) is defined as a trait here.
//! Implementations live in their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod message;
pub mod notify;
pub mod persona;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{EngineError, Error, NotifyError, ProviderError, Result, ToolError};
pub use message::{Conversation, ConversationId, Message, MessageToolCall, Role};
pub use notify::Notifier;
pub use persona::Persona;
pub use provider::{Provider, ProviderRequest, ProviderResponse, ToolDefinition, Usage};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult};
