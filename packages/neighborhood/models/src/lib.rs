#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighborhood recommendation record types.
//!
//! A [`NeighborhoodRecord`] is produced either by the language model (and
//! therefore only as complete as the model made it) or by the static
//! fallback catalog (always fully populated). Only `name`, `city` and
//! `matchScore` are required; everything else is optional. Fields are
//! read one at a time, so a single malformed value is read as absent
//! instead of discarding its group or the whole record. Numbers keep
//! their wire representation.

pub mod lenient;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use serde_json::Number;

/// A recommended neighborhood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodRecord {
    /// Identifier, unique within one response (e.g. `"1"`).
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Neighborhood name.
    #[serde(deserialize_with = "lenient::label")]
    pub name: String,
    /// City the neighborhood belongs to.
    #[serde(deserialize_with = "lenient::label")]
    pub city: String,
    /// State the neighborhood belongs to.
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub state: String,
    /// Locality description (e.g. "5th Block & 6th Block Area").
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub area: Option<String>,
    /// Postal code.
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub pincode: Option<String>,
    /// External map-search link.
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub google_maps_url: Option<String>,
    /// Compatibility score, nominally 0-100.
    pub match_score: MatchScore,
    /// Short positive points.
    #[serde(default, deserialize_with = "lenient::list")]
    pub strengths: Vec<String>,
    /// Short considerations.
    #[serde(default, deserialize_with = "lenient::list")]
    pub concerns: Vec<String>,
    /// Population statistics.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub demographics: Option<Demographics>,
    /// Lifestyle scores.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub lifestyle: Option<Lifestyle>,
    /// Amenity counts.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub amenities: Option<Amenities>,
    /// Transit and parking details.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub transportation: Option<Transportation>,
    /// Monthly cost estimates.
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost_breakdown: Option<CostBreakdown>,
    /// Why this neighborhood matches the profile.
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub explanation: Option<String>,
    /// Free-text lifestyle analysis.
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub ai_insights: Option<String>,
    /// Suggested next steps for the user.
    #[serde(default, deserialize_with = "lenient::list")]
    pub recommended_actions: Vec<String>,
    /// Well-known places nearby.
    #[serde(
        default,
        deserialize_with = "lenient::optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub nearby_landmarks: Option<Vec<String>>,
    /// When to visit to get a feel for the area.
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub best_time_to_visit: Option<String>,
    /// Practical advice from locals.
    #[serde(
        default,
        deserialize_with = "lenient::optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub local_tips: Option<Vec<String>>,
}

impl NeighborhoodRecord {
    /// Whether the record satisfies the output invariants: non-empty name
    /// and city, truthy match score.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.city.is_empty() && self.match_score.is_truthy()
    }

    /// Safety rating on a 0-10 scale derived from the crime rate.
    #[must_use]
    pub fn safety_score(&self) -> Option<f64> {
        self.lifestyle
            .as_ref()
            .and_then(|lifestyle| lifestyle.crime_rate.as_ref())
            .and_then(Number::as_f64)
            .map(|crime_rate| 10.0 - crime_rate)
    }

    /// School quality on a 0-10 scale.
    #[must_use]
    pub fn school_rating(&self) -> Option<f64> {
        self.lifestyle
            .as_ref()
            .and_then(|lifestyle| lifestyle.school_rating.as_ref())
            .and_then(Number::as_f64)
    }
}

/// A match score exactly as it appeared on the wire.
///
/// Model output is passed through untouched, so the score may be a whole
/// number, a fraction or even a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchScore(Value);

impl MatchScore {
    /// Numeric value of the score, if it has one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match &self.0 {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Whole-number value of the score, if it is one.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match &self.0 {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Whether the score counts as present (non-zero, non-empty).
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        lenient::is_truthy(&self.0)
    }

    /// Adds `boost`, capped at `cap`. Non-numeric scores are left alone.
    #[must_use]
    pub fn boosted(&self, boost: f64, cap: f64) -> Self {
        self.as_f64()
            .and_then(|score| to_number((score + boost).min(cap)))
            .map_or_else(|| self.clone(), |n| Self(Value::Number(n)))
    }
}

impl From<u32> for MatchScore {
    fn from(score: u32) -> Self {
        Self(Value::from(score))
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

/// Converts a computed value back to a wire number. Whole values stay
/// integral.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn to_number(value: f64) -> Option<Number> {
    if value.fract() == 0.0 && (0.0..=u64::MAX as f64).contains(&value) {
        Some(Number::from(value as u64))
    } else {
        Number::from_f64(value)
    }
}

/// Population statistics for a neighborhood.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Demographics {
    /// Median resident age in years.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub median_age: Option<Number>,
    /// Median annual household income in rupees.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub median_income: Option<Number>,
    /// Residents per square kilometre.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub population_density: Option<Number>,
    /// Diversity index, 0-1.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub diversity_index: Option<Number>,
}

/// Lifestyle scores for a neighborhood.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Lifestyle {
    /// Walkability, 0-100.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub walk_score: Option<Number>,
    /// Transit access, 0-100.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub transit_score: Option<Number>,
    /// Bikeability, 0-100.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub bike_score: Option<Number>,
    /// Incidents per thousand residents.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub crime_rate: Option<Number>,
    /// School quality, 0-10.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub school_rating: Option<Number>,
    /// Cost-of-living index (100 = city average).
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub cost_of_living_index: Option<Number>,
}

/// Amenity counts within the neighborhood.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Amenities {
    /// Restaurants and cafes.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub restaurants: Option<Number>,
    /// Parks.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub parks: Option<Number>,
    /// Gyms and fitness centres.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub gyms: Option<Number>,
    /// Grocery stores.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub grocery_stores: Option<Number>,
    /// Entertainment venues.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub entertainment: Option<Number>,
    /// Hospitals.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub hospitals: Option<Number>,
    /// Schools.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub schools: Option<Number>,
    /// Shopping malls.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub malls: Option<Number>,
}

/// Qualitative transport ratings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transportation {
    /// Nearest metro or rail station.
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub nearest_metro_station: Option<String>,
    /// Distance to that station (e.g. "0.8 km").
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub metro_distance: Option<String>,
    /// Bus network quality.
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub bus_connectivity: Option<String>,
    /// Auto-rickshaw availability.
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub auto_rickshaw_availability: Option<String>,
    /// Parking availability.
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub parking_availability: Option<String>,
}

/// Monthly cost estimates in rupees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostBreakdown {
    /// Rent for a one-bedroom unit.
    #[serde(
        rename = "rent1BHK",
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rent_1bhk: Option<Number>,
    /// Rent for a two-bedroom unit.
    #[serde(
        rename = "rent2BHK",
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rent_2bhk: Option<Number>,
    /// Rent for a three-bedroom unit.
    #[serde(
        rename = "rent3BHK",
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rent_3bhk: Option<Number>,
    /// Groceries per month.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub grocery_cost_per_month: Option<Number>,
    /// Average spend on one meal out.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub dining_out_average: Option<Number>,
    /// Utilities per month.
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub utilities_per_month: Option<Number>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_record_deserializes() {
        let record: NeighborhoodRecord = serde_json::from_value(serde_json::json!({
            "name": "Baner",
            "city": "Pune",
            "matchScore": 83,
        }))
        .unwrap();

        assert_eq!(record.name, "Baner");
        assert_eq!(record.match_score.as_u64(), Some(83));
        assert!(record.strengths.is_empty());
        assert!(record.lifestyle.is_none());
        assert!(record.is_complete());
    }

    #[test]
    fn one_bad_field_keeps_the_rest_of_its_group() {
        let record: NeighborhoodRecord = serde_json::from_value(serde_json::json!({
            "id": 2,
            "name": "Powai",
            "city": "Mumbai",
            "matchScore": 85.6,
            "lifestyle": { "walkScore": "high", "crimeRate": 1.5, "schoolRating": 9 },
            "transportation": { "nearestMetroStation": "Powai", "metroDistance": 1.2 },
            "amenities": { "restaurants": 80, "parks": 8 },
            "strengths": "not a list",
            "localTips": ["Lakeside walks", 24, null],
        }))
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("2"));
        let lifestyle = record.lifestyle.as_ref().unwrap();
        assert_eq!(lifestyle.walk_score, None);
        assert_eq!(record.school_rating(), Some(9.0));
        assert_eq!(record.safety_score(), Some(8.5));
        assert_eq!(
            record.transportation.as_ref().unwrap().metro_distance.as_deref(),
            Some("1.2")
        );
        assert_eq!(record.amenities.as_ref().unwrap().gyms, None);
        assert!(record.strengths.is_empty());
        assert_eq!(
            record.local_tips,
            Some(vec!["Lakeside walks".to_string(), "24".to_string()])
        );
    }

    #[test]
    fn non_object_group_is_absent() {
        let record: NeighborhoodRecord = serde_json::from_value(serde_json::json!({
            "name": "Powai",
            "city": "Mumbai",
            "matchScore": 85,
            "lifestyle": "great",
        }))
        .unwrap();

        assert!(record.lifestyle.is_none());
    }

    #[test]
    fn match_score_keeps_its_wire_value() {
        let record: NeighborhoodRecord = serde_json::from_value(serde_json::json!({
            "name": "BTM Layout",
            "city": "Bangalore",
            "matchScore": 0.4,
        }))
        .unwrap();

        assert!(record.is_complete());
        assert_eq!(record.match_score.as_f64(), Some(0.4));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["matchScore"], serde_json::json!(0.4));
    }

    #[test]
    fn boost_keeps_whole_scores_integral() {
        let whole = MatchScore::from(92).boosted(3.0, 95.0);
        assert_eq!(whole.as_u64(), Some(95));
        assert_eq!(whole.to_string(), "95");

        let capped = MatchScore::from(94).boosted(3.0, 95.0);
        assert_eq!(capped.as_u64(), Some(95));

        let fractional = MatchScore(serde_json::json!(90.5)).boosted(3.0, 95.0);
        assert_eq!(fractional.as_f64(), Some(93.5));

        let text = MatchScore(serde_json::json!("high"));
        assert_eq!(text.boosted(3.0, 95.0), text);
    }

    #[test]
    fn missing_match_score_is_rejected() {
        let result = serde_json::from_value::<NeighborhoodRecord>(serde_json::json!({
            "name": "X",
            "city": "Y",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn serializes_with_wire_names() {
        let record: NeighborhoodRecord = serde_json::from_value(serde_json::json!({
            "name": "Baner",
            "city": "Pune",
            "matchScore": 83,
            "costBreakdown": { "rent1BHK": 18000 },
        }))
        .unwrap();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["costBreakdown"]["rent1BHK"], 18000);
        assert!(json["costBreakdown"].get("rent2BHK").is_none());
        assert_eq!(json["matchScore"], 83);
        assert!(json.get("transportation").is_none());
    }
}
