#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the SmartHood server.
//!
//! Recommendation responses reuse the neighborhood record type directly;
//! only the envelope types that exist purely for the HTTP contract live
//! here.

use serde::{Deserialize, Serialize};
use smarthood_catalog::CityEntry;

/// Response header naming the path that served a recommendation request.
pub const RECOMMENDATION_SOURCE_HEADER: &str = "X-Recommendation-Source";

/// Error text returned when no completion provider is configured.
pub const UNAVAILABLE_ERROR: &str = "API key not configured";

/// Error text returned when generation fails.
pub const GENERATION_ERROR: &str = "Failed to generate neighborhood analysis. Please try again.";

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// A catalogued city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCity {
    /// City name.
    pub city: String,
    /// State name.
    pub state: String,
    /// Number of curated neighborhoods.
    pub neighborhood_count: usize,
}

impl From<&CityEntry> for ApiCity {
    fn from(entry: &CityEntry) -> Self {
        Self {
            city: entry.city.clone(),
            state: entry.state.clone(),
            neighborhood_count: entry.neighborhoods.len(),
        }
    }
}

/// Error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// User-facing message.
    pub error: String,
    /// Underlying cause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates an error body with details.
    #[must_use]
    pub fn with_details(error: &str, details: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            details: Some(details.into()),
        }
    }
}
