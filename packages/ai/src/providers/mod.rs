//! Completion provider abstraction and implementations.
//!
//! Supports Google Gemini, `OpenAI` and Anthropic Claude via a common trait.

pub mod anthropic;
pub mod gemini;
pub mod openai;
pub mod unconfigured;

use reqwest::StatusCode;

use crate::AiError;

/// Default output budget for a single completion.
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Trait for text-completion providers.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends `prompt` as a single user turn and returns the raw completion
    /// text verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Config`] if the provider has no usable
    /// credentials, [`AiError::QuotaExhausted`] if the provider reports a
    /// quota or rate limit, and another [`AiError`] for any other failure.
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;

    /// Short provider name for logging.
    fn name(&self) -> &'static str;
}

/// Creates a completion provider based on environment variables.
///
/// If `AI_PROVIDER` is explicitly set, uses that provider. Otherwise
/// auto-detects from available credentials:
///
/// 1. `GOOGLE_AI_API_KEY` or `GEMINI_API_KEY` set -> Gemini
/// 2. `OPENAI_API_KEY` or `AI_BASE_URL` set -> `OpenAI`
/// 3. `ANTHROPIC_API_KEY` set -> Anthropic Claude
///
/// `AI_MODEL` overrides the provider's default model.
///
/// # Errors
///
/// Returns [`AiError::Config`] if no credentials are found or the
/// explicitly requested provider is not configured.
pub fn create_provider_from_env() -> Result<Box<dyn CompletionProvider>, AiError> {
    let provider = std::env::var("AI_PROVIDER").unwrap_or_else(|_| detect_provider());
    let model = std::env::var("AI_MODEL").ok();

    match provider.to_lowercase().as_str() {
        "gemini" | "google" => {
            let api_key = std::env::var("GOOGLE_AI_API_KEY")
                .or_else(|_| std::env::var("GEMINI_API_KEY"))
                .map_err(|_| AiError::Config {
                    message: "GOOGLE_AI_API_KEY environment variable not set".to_string(),
                })?;
            let model = model.unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string());
            Ok(Box::new(gemini::GeminiProvider::new(api_key, model)))
        }
        "openai" | "gpt" => {
            let base_url = std::env::var("AI_BASE_URL").ok();
            let api_key = std::env::var("OPENAI_API_KEY").ok();
            if api_key.is_none() && base_url.is_none() {
                return Err(AiError::Config {
                    message: "OPENAI_API_KEY environment variable not set".to_string(),
                });
            }
            let model = model.unwrap_or_else(|| openai::DEFAULT_MODEL.to_string());
            Ok(Box::new(openai::OpenAiProvider::new(
                api_key,
                model,
                base_url.unwrap_or_else(|| openai::DEFAULT_BASE_URL.to_string()),
            )))
        }
        "anthropic" | "claude" => {
            let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| AiError::Config {
                message: "ANTHROPIC_API_KEY environment variable not set".to_string(),
            })?;
            let model = model.unwrap_or_else(|| anthropic::DEFAULT_MODEL.to_string());
            Ok(Box::new(anthropic::AnthropicProvider::new(api_key, model)))
        }
        other => Err(AiError::Config {
            message: format!(
                "Unknown AI provider: {other}. Use 'gemini', 'openai', or 'anthropic'."
            ),
        }),
    }
}

/// Like [`create_provider_from_env`], but installs an
/// [`unconfigured::UnconfiguredProvider`] instead of failing, so the
/// configuration problem is reported on every request.
#[must_use]
pub fn provider_from_env_or_unconfigured() -> Box<dyn CompletionProvider> {
    match create_provider_from_env() {
        Ok(provider) => {
            log::info!("Using {} completion provider", provider.name());
            provider
        }
        Err(AiError::Config { message }) => {
            log::warn!("No completion provider configured: {message}");
            Box::new(unconfigured::UnconfiguredProvider::new(message))
        }
        Err(e) => {
            log::warn!("Failed to create completion provider: {e}");
            Box::new(unconfigured::UnconfiguredProvider::new(e.to_string()))
        }
    }
}

/// Auto-detects which provider to use based on available credentials.
///
/// Returns a provider name string that matches the arms in
/// [`create_provider_from_env`].
fn detect_provider() -> String {
    if std::env::var("GOOGLE_AI_API_KEY").is_ok() || std::env::var("GEMINI_API_KEY").is_ok() {
        log::info!("Auto-detected AI provider: Gemini (GOOGLE_AI_API_KEY found)");
        return "gemini".to_string();
    }

    if std::env::var("OPENAI_API_KEY").is_ok() || std::env::var("AI_BASE_URL").is_ok() {
        log::info!("Auto-detected AI provider: OpenAI (OPENAI_API_KEY or AI_BASE_URL found)");
        return "openai".to_string();
    }

    if std::env::var("ANTHROPIC_API_KEY").is_ok() {
        log::info!("Auto-detected AI provider: Anthropic (ANTHROPIC_API_KEY found)");
        return "anthropic".to_string();
    }

    log::warn!(
        "No AI credentials detected. Set one of: GOOGLE_AI_API_KEY, \
         OPENAI_API_KEY, ANTHROPIC_API_KEY. You can also set AI_PROVIDER explicitly."
    );

    // Gemini produces a clear error about the missing key
    "gemini".to_string()
}

/// Builds the error for a non-success upstream response.
///
/// `code` is the provider's machine-readable error code when it sends one
/// (e.g. `RESOURCE_EXHAUSTED`, `insufficient_quota`, `rate_limit_error`).
pub(crate) fn upstream_error(status: StatusCode, code: Option<&str>, message: String) -> AiError {
    if status == StatusCode::TOO_MANY_REQUESTS
        || code.is_some_and(is_quota_code)
        || is_quota_message(&message)
    {
        AiError::QuotaExhausted { message }
    } else {
        AiError::Provider { message }
    }
}

fn is_quota_code(code: &str) -> bool {
    matches!(
        code,
        "RESOURCE_EXHAUSTED" | "insufficient_quota" | "rate_limit_exceeded" | "rate_limit_error"
    )
}

/// Whether a free-text error message reports quota exhaustion.
#[must_use]
pub fn is_quota_message(message: &str) -> bool {
    message.contains("429") || message.to_lowercase().contains("quota")
}
