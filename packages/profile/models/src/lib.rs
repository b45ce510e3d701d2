#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Lifestyle questionnaire profile types.
//!
//! A [`UserProfile`] is the JSON document produced by the assessment form.
//! Every field is optional on the wire: the form may submit a partially
//! completed profile and the recommendation pipeline must still produce a
//! prompt from it. Slider ratings arrive as single-element arrays (`[8]`),
//! which [`SliderValue`] models directly.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// City used when the profile does not name one.
pub const DEFAULT_CITY: &str = "Mumbai";

/// State used when the profile does not name one.
pub const DEFAULT_STATE: &str = "Maharashtra";

/// A 1-10 slider rating.
///
/// Deserializes from either `[n]` or `n` and always serializes as `[n]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "[u8; 1]", try_from = "SliderRepr")]
pub struct SliderValue(u8);

impl SliderValue {
    /// Creates a slider value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the numeric rating.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for SliderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SliderValue> for [u8; 1] {
    fn from(value: SliderValue) -> Self {
        [value.0]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SliderRepr {
    List(Vec<u8>),
    Single(u8),
}

/// Error returned when a slider payload carries no rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptySliderError;

impl std::fmt::Display for EmptySliderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slider value must contain one rating")
    }
}

impl std::error::Error for EmptySliderError {}

impl TryFrom<SliderRepr> for SliderValue {
    type Error = EmptySliderError;

    fn try_from(repr: SliderRepr) -> Result<Self, Self::Error> {
        match repr {
            SliderRepr::List(values) => values.first().copied().map(Self).ok_or(EmptySliderError),
            SliderRepr::Single(value) => Ok(Self(value)),
        }
    }
}

/// One of the eight neighborhood factors the user rates.
///
/// Variant order is the declaration order used to break ties when ranking.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum PriorityDimension {
    /// Safety & security
    Safety,
    /// Educational quality
    Schools,
    /// Entertainment & nightlife
    Nightlife,
    /// Parks & recreation
    OutdoorAccess,
    /// Public transportation
    PublicTransit,
    /// Walkability
    Walkability,
    /// Affordability
    CostOfLiving,
    /// Cultural diversity
    Diversity,
}

impl PriorityDimension {
    /// Returns all variants in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Safety,
            Self::Schools,
            Self::Nightlife,
            Self::OutdoorAccess,
            Self::PublicTransit,
            Self::Walkability,
            Self::CostOfLiving,
            Self::Diversity,
        ]
    }

    /// Human-readable label shown on the questionnaire.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Safety => "Safety & Security",
            Self::Schools => "Educational Quality",
            Self::Nightlife => "Entertainment & Nightlife",
            Self::OutdoorAccess => "Parks & Recreation",
            Self::PublicTransit => "Public Transportation",
            Self::Walkability => "Walkability Score",
            Self::CostOfLiving => "Affordability",
            Self::Diversity => "Cultural Diversity",
        }
    }
}

/// Basic information about the user and their household.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalProfile {
    /// Age bracket (e.g. `"26-35"`).
    pub age_range: String,
    /// Household size (e.g. `"2"`, `"5+"`).
    pub household_size: String,
    /// Annual income bracket (e.g. `"10L-15L"`).
    pub income: String,
    /// Whether the household has children.
    pub has_children: bool,
    /// Whether the household has pets.
    pub has_pets: bool,
    /// Age groups of the children.
    pub children_ages: Vec<String>,
    /// Special needs of the children (schools, play areas, ...).
    pub children_needs: Vec<String>,
}

/// Target city and areas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationPreferences {
    /// Target city.
    pub city: String,
    /// Target state.
    pub state: String,
    /// Areas picked from suggestions.
    pub preferred_areas: Vec<String>,
    /// Areas typed in by the user.
    pub custom_areas: Vec<String>,
}

/// Daily routine ratings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LifestyleFactors {
    /// Where the user works (`"office"`, `"remote"`, ...).
    pub work_location: String,
    /// Preferred commute mode.
    pub commute_preference: String,
    /// Activity level, 1-10.
    pub activity_level: Option<SliderValue>,
    /// Social preference, 1-10.
    pub social_preference: Option<SliderValue>,
    /// Noise tolerance, 1-10.
    pub noise_preference: Option<SliderValue>,
}

/// The priority matrix. A dimension missing from the payload stays `None`
/// and is excluded from ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NeighborhoodPriorities {
    /// Safety & security.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety: Option<SliderValue>,
    /// Educational quality.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schools: Option<SliderValue>,
    /// Entertainment & nightlife.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nightlife: Option<SliderValue>,
    /// Parks & recreation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outdoor_access: Option<SliderValue>,
    /// Public transportation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_transit: Option<SliderValue>,
    /// Walkability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walkability: Option<SliderValue>,
    /// Affordability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_of_living: Option<SliderValue>,
    /// Cultural diversity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diversity: Option<SliderValue>,
}

impl NeighborhoodPriorities {
    /// Returns the rating for `dimension`, if the user supplied one.
    #[must_use]
    pub const fn get(&self, dimension: PriorityDimension) -> Option<SliderValue> {
        match dimension {
            PriorityDimension::Safety => self.safety,
            PriorityDimension::Schools => self.schools,
            PriorityDimension::Nightlife => self.nightlife,
            PriorityDimension::OutdoorAccess => self.outdoor_access,
            PriorityDimension::PublicTransit => self.public_transit,
            PriorityDimension::Walkability => self.walkability,
            PriorityDimension::CostOfLiving => self.cost_of_living,
            PriorityDimension::Diversity => self.diversity,
        }
    }

    /// Returns the rated dimensions sorted by rating, highest first.
    ///
    /// The sort is stable over [`PriorityDimension::all`], so equal
    /// ratings keep declaration order.
    #[must_use]
    pub fn ranked(&self) -> Vec<(PriorityDimension, SliderValue)> {
        let mut ranked: Vec<_> = PriorityDimension::all()
            .iter()
            .filter_map(|dim| self.get(*dim).map(|value| (*dim, value)))
            .collect();
        ranked.sort_by(|(_, a), (_, b)| b.cmp(a));
        ranked
    }

    /// Returns at most `n` of the highest-rated dimensions.
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<(PriorityDimension, SliderValue)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

/// The complete questionnaire submitted by the assessment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    /// Household information.
    pub personal_profile: PersonalProfile,
    /// Target location.
    pub location_preferences: LocationPreferences,
    /// Daily routine.
    pub lifestyle_factors: LifestyleFactors,
    /// Priority matrix.
    pub neighborhood_priorities: NeighborhoodPriorities,
    /// Amenities picked from the checklist.
    pub essential_amenities: Vec<String>,
    /// Amenities typed in by the user.
    pub custom_amenities: Vec<String>,
    /// Deal breakers picked from the checklist.
    pub deal_breakers: Vec<String>,
    /// Deal breakers typed in by the user.
    pub custom_deal_breakers: Vec<String>,
}

/// Number of priorities that count as "top" priorities.
pub const TOP_PRIORITY_COUNT: usize = 3;

impl UserProfile {
    /// Returns the target city, or `default` when it is blank.
    #[must_use]
    pub fn city_or<'a>(&'a self, default: &'a str) -> &'a str {
        non_blank(&self.location_preferences.city).unwrap_or(default)
    }

    /// Returns the target state, or `default` when it is blank.
    #[must_use]
    pub fn state_or<'a>(&'a self, default: &'a str) -> &'a str {
        non_blank(&self.location_preferences.state).unwrap_or(default)
    }

    /// The user's three highest-rated priorities.
    #[must_use]
    pub fn top_priorities(&self) -> Vec<(PriorityDimension, SliderValue)> {
        self.neighborhood_priorities.top(TOP_PRIORITY_COUNT)
    }

    /// Whether `dimension` is among the user's top priorities.
    #[must_use]
    pub fn is_top_priority(&self, dimension: PriorityDimension) -> bool {
        self.top_priorities().iter().any(|(dim, _)| *dim == dimension)
    }

    /// Labels of the required questionnaire fields that are blank.
    #[must_use]
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let personal = &self.personal_profile;
        let location = &self.location_preferences;

        [
            (personal.age_range.as_str(), "Age Range"),
            (personal.household_size.as_str(), "Household Size"),
            (personal.income.as_str(), "Income"),
            (location.city.as_str(), "City"),
            (location.state.as_str(), "State"),
        ]
        .into_iter()
        .filter(|(value, _)| non_blank(value).is_none())
        .map(|(_, label)| label)
        .collect()
    }
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
