#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Text-completion provider abstraction.
//!
//! Supports Google Gemini (the default), `OpenAI` and any
//! `OpenAI`-compatible self-hosted server (Ollama, vLLM, llama.cpp,
//! LM Studio) via the `AI_BASE_URL` environment variable, and Anthropic
//! Claude. Every provider sends exactly one request per call and returns
//! the raw completion text; interpreting that text is the caller's job.
//!
//! Quota and rate-limit responses are classified inside each provider as
//! [`AiError::QuotaExhausted`] so callers can react to saturation without
//! parsing provider-specific error bodies.

pub mod providers;

use thiserror::Error;

/// Errors that can occur during AI operations.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP request to the provider failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider-specific error.
    #[error("Provider error: {message}")]
    Provider {
        /// Description of what went wrong.
        message: String,
    },

    /// The provider refused the request because a quota or rate limit
    /// was hit.
    #[error("Quota exhausted: {message}")]
    QuotaExhausted {
        /// Upstream message.
        message: String,
    },

    /// Configuration error, such as a missing API key.
    #[error("Configuration error: {message}")]
    Config {
        /// Description.
        message: String,
    },
}

impl AiError {
    /// Whether the error means the provider is saturated rather than
    /// broken.
    #[must_use]
    pub const fn is_quota(&self) -> bool {
        matches!(self, Self::QuotaExhausted { .. })
    }
}

pub use providers::{CompletionProvider, create_provider_from_env, provider_from_env_or_unconfigured};
