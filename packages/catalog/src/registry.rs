//! Compile-time registry of catalogued cities.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Adding a new city requires creating a TOML file in `cities/` and adding
//! a corresponding entry here.

/// Number of registered cities. Updated when new cities are added.
/// Enforced by a test.
#[cfg(test)]
const EXPECTED_CITY_COUNT: usize = 4;

/// Embedded TOML city definitions.
pub const SOURCE_TOMLS: &[(&str, &str)] = &[
    ("bangalore", include_str!("../cities/bangalore.toml")),
    ("mumbai", include_str!("../cities/mumbai.toml")),
    ("delhi", include_str!("../cities/delhi.toml")),
    ("pune", include_str!("../cities/pune.toml")),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_cities() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.len(),
            EXPECTED_CITY_COUNT,
            "Expected {EXPECTED_CITY_COUNT} catalog cities, found {}. \
             Update EXPECTED_CITY_COUNT after adding/removing cities.",
            catalog.len()
        );
        assert_eq!(SOURCE_TOMLS.len(), EXPECTED_CITY_COUNT);
    }

    #[test]
    fn neighborhood_ids_are_unique_per_city() {
        for entry in Catalog::builtin().cities() {
            let mut seen = BTreeSet::new();
            for n in &entry.neighborhoods {
                let id = n.id.as_deref().unwrap_or_default();
                assert!(
                    seen.insert(id),
                    "Duplicate neighborhood id {id} in {}",
                    entry.city
                );
            }
        }
    }

    #[test]
    fn all_records_are_fully_populated() {
        for entry in Catalog::builtin().cities() {
            for n in &entry.neighborhoods {
                assert_eq!(n.city, entry.city, "{} has mismatched city", n.name);
                assert!(!n.state.is_empty(), "{} has empty state", n.name);
                assert!(n.demographics.is_some(), "{} lacks demographics", n.name);
                assert!(n.lifestyle.is_some(), "{} lacks lifestyle", n.name);
                assert!(n.amenities.is_some(), "{} lacks amenities", n.name);
                assert!(n.transportation.is_some(), "{} lacks transportation", n.name);
                assert!(n.cost_breakdown.is_some(), "{} lacks cost breakdown", n.name);
                assert!(n.school_rating().is_some(), "{} lacks a school rating", n.name);
                assert!(n.safety_score().is_some(), "{} lacks a crime rate", n.name);
                assert!(
                    n.cost_breakdown
                        .as_ref()
                        .is_some_and(|c| c.rent_1bhk.is_some() && c.utilities_per_month.is_some()),
                    "{} has gaps in its cost breakdown",
                    n.name
                );
                assert_eq!(n.strengths.len(), 4, "{} strengths", n.name);
                assert_eq!(n.concerns.len(), 2, "{} concerns", n.name);
                assert!(
                    n.google_maps_url
                        .as_deref()
                        .is_some_and(|url| url.starts_with("https://www.google.com/maps/search/")),
                    "{} has a bad map link",
                    n.name
                );
            }
        }
    }

    #[test]
    fn bangalore_matches_curated_order() {
        let entry = Catalog::builtin().get("Bangalore").unwrap();
        let names: Vec<_> = entry.neighborhoods.iter().map(|n| n.name.as_str()).collect();
        let scores: Vec<_> = entry
            .neighborhoods
            .iter()
            .filter_map(|n| n.match_score.as_u64())
            .collect();
        assert_eq!(names, vec!["Koramangala", "Indiranagar", "Whitefield"]);
        assert_eq!(scores, vec![91, 87, 84]);
    }
}
