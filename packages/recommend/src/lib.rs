#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighborhood recommendation pipeline.
//!
//! Builds a prompt from the questionnaire profile, asks the configured
//! completion provider for three neighborhoods and validates the answer.
//! When the provider is out of quota or its answer is unusable, the
//! deterministic catalog fallback is served instead. Configuration
//! failures and other upstream errors are never masked by the fallback.

pub mod extract;
pub mod fallback;
pub mod pipeline;
pub mod prompt;

use serde::Serialize;
use smarthood_neighborhood_models::NeighborhoodRecord;
use smarthood_profile_models::{DEFAULT_CITY, DEFAULT_STATE};
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

pub use pipeline::{PipelineConfig, RecommendationPipeline};

/// Errors that end a recommendation request.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// No completion provider is configured.
    #[error("API key not configured: {message}")]
    Unavailable {
        /// Configuration problem reported by the provider.
        message: String,
    },

    /// The provider failed for a reason other than quota exhaustion.
    #[error("Failed to generate neighborhood analysis: {message}")]
    Generation {
        /// Underlying error message.
        message: String,
    },
}

impl RecommendError {
    /// The underlying message, without the category prefix.
    #[must_use]
    pub fn details(&self) -> &str {
        match self {
            Self::Unavailable { message } | Self::Generation { message } => message,
        }
    }
}

/// Which path produced a set of recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecommendationSource {
    /// Extracted from the model's answer.
    Ai,
    /// Synthesized from the static catalog.
    Fallback,
}

/// A non-empty list of recommendations and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    /// Recommended neighborhoods, in the order they were produced.
    pub neighborhoods: Vec<NeighborhoodRecord>,
    /// Path that produced them.
    pub source: RecommendationSource,
}

/// City and state used when the profile leaves them blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDefaults {
    /// Default city.
    pub city: String,
    /// Default state.
    pub state: String,
}

impl Default for LocationDefaults {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            state: DEFAULT_STATE.to_string(),
        }
    }
}
