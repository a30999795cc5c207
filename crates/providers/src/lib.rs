//! Chat-completion provider implementations for vitae.
//!
//! All providers implement the `vitae_core::Provider` trait. The default
//! deployment talks to Groq, but any OpenAI-compatible endpoint works.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;
