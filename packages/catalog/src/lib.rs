#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static neighborhood catalog.
//!
//! Hand-curated neighborhood records for a handful of cities, used when
//! the language model is saturated or returns something unusable. Each
//! city is a TOML file embedded at compile time (see [`registry`]) and
//! parsed once into an immutable [`Catalog`] shared by every request.
//! Cities missing from the catalog get a single record built from the
//! [`generic`] template.

pub mod generic;
pub mod registry;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;
use smarthood_neighborhood_models::NeighborhoodRecord;
use thiserror::Error;

/// Errors that can occur while loading catalog sources.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A source file is not valid TOML or does not match the schema.
    #[error("Failed to parse catalog source '{name}': {source}")]
    Parse {
        /// Registry name of the source.
        name: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// A source parsed but violates a catalog invariant.
    #[error("Invalid catalog source '{name}': {message}")]
    Invalid {
        /// Registry name of the source.
        name: String,
        /// Description of what went wrong.
        message: String,
    },
}

/// All catalog neighborhoods for one city.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CityEntry {
    /// City name, matched exactly against the user's target city.
    pub city: String,
    /// State the city belongs to.
    pub state: String,
    /// Fully populated neighborhood records, in display order.
    pub neighborhoods: Vec<NeighborhoodRecord>,
}

/// Immutable city-keyed neighborhood lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cities: BTreeMap<String, CityEntry>,
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_sources(registry::SOURCE_TOMLS)
        .unwrap_or_else(|e| panic!("Embedded neighborhood catalog is invalid: {e}"))
});

impl Catalog {
    /// Returns the catalog compiled into the binary.
    ///
    /// Parsed on first access and shared for the life of the process.
    ///
    /// # Panics
    ///
    /// Panics if any embedded TOML file fails to parse. Since these are
    /// compile-time constants, a failure is a development error and is
    /// caught by the registry tests.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Builds a catalog from `(name, toml_content)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if a source fails to parse, lists no
    /// neighborhoods, contains an incomplete record, or repeats a city.
    pub fn from_sources(sources: &[(&str, &str)]) -> Result<Self, CatalogError> {
        let mut cities = BTreeMap::new();

        for (name, toml_str) in sources {
            let entry = parse_city(name, toml_str)?;
            log::trace!(
                "Loaded catalog city {} ({} neighborhoods)",
                entry.city,
                entry.neighborhoods.len()
            );

            if cities.contains_key(&entry.city) {
                return Err(CatalogError::Invalid {
                    name: (*name).to_string(),
                    message: format!("duplicate city '{}'", entry.city),
                });
            }
            cities.insert(entry.city.clone(), entry);
        }

        Ok(Self { cities })
    }

    /// Looks up a city by exact, case-sensitive name.
    #[must_use]
    pub fn get(&self, city: &str) -> Option<&CityEntry> {
        self.cities.get(city)
    }

    /// Iterates over all cities in name order.
    pub fn cities(&self) -> impl Iterator<Item = &CityEntry> {
        self.cities.values()
    }

    /// Number of cities in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Whether the catalog has no cities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Returns the neighborhoods for `city`, or the generic template when
    /// the city is not catalogued. Never empty.
    #[must_use]
    pub fn neighborhoods_for(&self, city: &str, state: &str) -> Vec<NeighborhoodRecord> {
        self.get(city).map_or_else(
            || {
                log::debug!("No catalog entry for {city}; using generic template");
                vec![generic::neighborhood(city, state)]
            },
            |entry| entry.neighborhoods.clone(),
        )
    }
}

fn parse_city(name: &str, toml_str: &str) -> Result<CityEntry, CatalogError> {
    let entry: CityEntry = toml::de::from_str(toml_str).map_err(|source| CatalogError::Parse {
        name: name.to_string(),
        source,
    })?;

    if entry.neighborhoods.is_empty() {
        return Err(CatalogError::Invalid {
            name: name.to_string(),
            message: "no neighborhoods listed".to_string(),
        });
    }

    if let Some(bad) = entry.neighborhoods.iter().find(|n| !n.is_complete()) {
        return Err(CatalogError::Invalid {
            name: name.to_string(),
            message: format!("neighborhood '{}' is missing a name, city or score", bad.name),
        });
    }

    Ok(entry)
}
