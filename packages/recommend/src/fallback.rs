//! Deterministic recommendations from the static catalog.

use smarthood_catalog::Catalog;
use smarthood_neighborhood_models::{NeighborhoodRecord, to_number};
use smarthood_profile_models::{PriorityDimension, UserProfile};

/// Strength appended for households with children.
pub const FAMILY_STRENGTH: &str = "Good schools and family amenities";

/// Strength appended when safety is a top priority.
pub const SAFETY_STRENGTH: &str = "Safe environment";

/// Number of existing strengths kept before an appended one.
const KEPT_STRENGTHS: usize = 3;

const SAFETY_BOOST: f64 = 3.0;
const SAFETY_SCORE_CAP: f64 = 95.0;
const SCHOOL_RATING_BOOST: f64 = 0.5;
const SCHOOL_RATING_CAP: f64 = 10.0;

/// Picks the catalog records for `city` (or the generic template) and
/// tailors them to the profile.
///
/// Children adjustment runs first, then the safety boost. Never empty.
#[must_use]
pub fn synthesize(
    catalog: &Catalog,
    city: &str,
    state: &str,
    profile: &UserProfile,
) -> Vec<NeighborhoodRecord> {
    log::info!("Generating fallback recommendations for {city}, {state}");

    let mut neighborhoods = catalog.neighborhoods_for(city, state);

    if profile.personal_profile.has_children {
        neighborhoods.iter_mut().for_each(apply_family_adjustment);
    }

    if profile.is_top_priority(PriorityDimension::Safety) {
        neighborhoods.iter_mut().for_each(apply_safety_boost);
    }

    neighborhoods
}

fn apply_family_adjustment(record: &mut NeighborhoodRecord) {
    replace_tail_strength(record, FAMILY_STRENGTH);

    let boosted = record
        .school_rating()
        .and_then(|rating| to_number((rating + SCHOOL_RATING_BOOST).min(SCHOOL_RATING_CAP)));
    if let (Some(lifestyle), Some(rating)) = (record.lifestyle.as_mut(), boosted) {
        lifestyle.school_rating = Some(rating);
    }
}

fn apply_safety_boost(record: &mut NeighborhoodRecord) {
    record.match_score = record.match_score.boosted(SAFETY_BOOST, SAFETY_SCORE_CAP);

    if !record.strengths.iter().any(|s| s == SAFETY_STRENGTH) {
        replace_tail_strength(record, SAFETY_STRENGTH);
    }
}

fn replace_tail_strength(record: &mut NeighborhoodRecord, strength: &str) {
    record.strengths.truncate(KEPT_STRENGTHS);
    record.strengths.push(strength.to_string());
}
