//! Placeholder provider installed when no credentials are configured.

use super::CompletionProvider;
use crate::AiError;

/// Provider whose every call fails with [`AiError::Config`].
pub struct UnconfiguredProvider {
    reason: String,
}

impl UnconfiguredProvider {
    /// Creates a provider that reports `reason` on every call.
    #[must_use]
    pub const fn new(reason: String) -> Self {
        Self { reason }
    }
}

#[async_trait::async_trait]
impl CompletionProvider for UnconfiguredProvider {
    async fn complete(&self, _prompt: &str) -> Result<String, AiError> {
        Err(AiError::Config {
            message: self.reason.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "unconfigured"
    }
}
