//! Projects a questionnaire profile into the completion prompt.

use smarthood_profile_models::UserProfile;

use crate::LocationDefaults;

/// Builds the instruction sent to the model.
///
/// Asks for exactly three real neighborhoods of the target city in the
/// fixed record shape, returned as a bare JSON array.
#[must_use]
pub fn build_prompt(profile: &UserProfile, defaults: &LocationDefaults) -> String {
    let city = profile.city_or(&defaults.city);
    let state = profile.state_or(&defaults.state);
    let personal = &profile.personal_profile;

    let children = if personal.has_children {
        "Has children"
    } else {
        "No children"
    };

    let priorities = profile
        .top_priorities()
        .into_iter()
        .map(|(dimension, rating)| format!("{}: {rating}/10", dimension.as_ref()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Generate 3 REAL neighborhoods in {city}, {state}, India as JSON array.

USER: Age {age}, Income {income}, {children}

TOP PRIORITIES: {priorities}

Return JSON array with this structure for each REAL neighborhood in {city}:
{{
  "id": "1",
  "name": "Real neighborhood name in {city}",
  "city": "{city}",
  "state": "{state}",
  "area": "Locality description",
  "pincode": "Real pincode for {city}",
  "googleMapsUrl": "https://www.google.com/maps/search/[neighborhood]+{city}+{state}",
  "matchScore": 85-95,
  "strengths": ["4 specific strengths"],
  "concerns": ["2 considerations"],
  "demographics": {{"medianAge": 30, "medianIncome": 1200000, "populationDensity": 15000, "diversityIndex": 0.8}},
  "lifestyle": {{"walkScore": 80, "transitScore": 85, "bikeScore": 70, "crimeRate": 2.0, "schoolRating": 8.0, "costOfLivingIndex": 120}},
  "amenities": {{"restaurants": 100, "parks": 5, "gyms": 15, "groceryStores": 12, "entertainment": 20, "hospitals": 8, "schools": 10, "malls": 3}},
  "transportation": {{"nearestMetroStation": "Station name", "metroDistance": "1 km", "busConnectivity": "Good", "autoRickshawAvailability": "High", "parkingAvailability": "Limited"}},
  "costBreakdown": {{"rent1BHK": 25000, "rent2BHK": 40000, "rent3BHK": 65000, "groceryCostPerMonth": 5000, "diningOutAverage": 500, "utilitiesPerMonth": 2500}},
  "explanation": "Why this matches user preferences",
  "aiInsights": "Lifestyle analysis",
  "recommendedActions": ["4 specific actions"],
  "nearbyLandmarks": ["3 real landmarks"],
  "bestTimeToVisit": "Best time to visit",
  "localTips": ["2 local tips"]
}}

Use ONLY real neighborhoods in {city}. Return JSON array only."#,
        age = personal.age_range,
        income = personal.income,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarthood_profile_models::UserProfile;

    fn profile(value: serde_json::Value) -> UserProfile {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn embeds_user_and_top_three_priorities() {
        let profile = profile(serde_json::json!({
            "personalProfile": { "ageRange": "26-35", "income": "10L-15L", "hasChildren": true },
            "locationPreferences": { "city": "Bangalore", "state": "Karnataka" },
            "neighborhoodPriorities": {
                "safety": [9], "schools": [4], "nightlife": [7],
                "publicTransit": [8], "diversity": [9]
            }
        }));

        let prompt = build_prompt(&profile, &LocationDefaults::default());

        assert!(prompt.starts_with("Generate 3 REAL neighborhoods in Bangalore, Karnataka, India"));
        assert!(prompt.contains("USER: Age 26-35, Income 10L-15L, Has children"));
        assert!(prompt.contains("TOP PRIORITIES: safety: 9/10, diversity: 9/10, publicTransit: 8/10\n"));
        assert!(prompt.ends_with("Use ONLY real neighborhoods in Bangalore. Return JSON array only."));
    }

    #[test]
    fn blank_location_uses_defaults() {
        let profile = profile(serde_json::json!({
            "locationPreferences": { "city": "  ", "state": "" }
        }));

        let prompt = build_prompt(&profile, &LocationDefaults::default());

        assert!(prompt.starts_with("Generate 3 REAL neighborhoods in Mumbai, Maharashtra, India"));
        assert!(prompt.contains("No children"));
        assert!(prompt.contains("TOP PRIORITIES: \n"));
    }
}
