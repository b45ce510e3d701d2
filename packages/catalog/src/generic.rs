//! Template record for cities without a catalog entry.

use smarthood_neighborhood_models::{
    Amenities, CostBreakdown, Demographics, Lifestyle, NeighborhoodRecord, Number, Transportation,
};

/// Match score given to the generic record.
pub const GENERIC_MATCH_SCORE: u32 = 85;

/// Builds the single placeholder neighborhood for an uncatalogued city.
#[must_use]
pub fn neighborhood(city: &str, state: &str) -> NeighborhoodRecord {
    NeighborhoodRecord {
        id: Some("1".to_string()),
        name: format!("{city} Central"),
        city: city.to_string(),
        state: state.to_string(),
        area: Some("Central Business District".to_string()),
        pincode: Some("000001".to_string()),
        google_maps_url: Some(format!(
            "https://www.google.com/maps/search/{}+Central+{}",
            plus_joined(city),
            plus_joined(state)
        )),
        match_score: GENERIC_MATCH_SCORE.into(),
        strengths: strings(&[
            "Central location",
            "Good connectivity",
            "Business hub",
            "Urban amenities",
        ]),
        concerns: strings(&["Higher cost", "Traffic congestion"]),
        demographics: Some(Demographics {
            median_age: Some(32.into()),
            median_income: Some(1_200_000.into()),
            population_density: Some(15_000.into()),
            diversity_index: Number::from_f64(0.75),
        }),
        lifestyle: Some(Lifestyle {
            walk_score: Some(80.into()),
            transit_score: Some(85.into()),
            bike_score: Some(70.into()),
            crime_rate: Number::from_f64(2.5),
            school_rating: Number::from_f64(7.5),
            cost_of_living_index: Some(125.into()),
        }),
        amenities: Some(Amenities {
            restaurants: Some(100.into()),
            parks: Some(5.into()),
            gyms: Some(15.into()),
            grocery_stores: Some(12.into()),
            entertainment: Some(20.into()),
            hospitals: Some(8.into()),
            schools: Some(10.into()),
            malls: Some(3.into()),
        }),
        transportation: Some(Transportation {
            nearest_metro_station: Some(format!("{city} Central Station")),
            metro_distance: Some("0.5 km".to_string()),
            bus_connectivity: Some("Good".to_string()),
            auto_rickshaw_availability: Some("High".to_string()),
            parking_availability: Some("Limited".to_string()),
        }),
        cost_breakdown: Some(CostBreakdown {
            rent_1bhk: Some(20_000.into()),
            rent_2bhk: Some(35_000.into()),
            rent_3bhk: Some(55_000.into()),
            grocery_cost_per_month: Some(5_000.into()),
            dining_out_average: Some(400.into()),
            utilities_per_month: Some(2_500.into()),
        }),
        explanation: Some(format!(
            "Central area in {city} offers good connectivity and urban amenities."
        )),
        ai_insights: Some(format!(
            "Commercial heart of {city} with developing infrastructure."
        )),
        recommended_actions: vec![
            format!("Explore main areas of {city}"),
            "Check transportation".to_string(),
            "Visit during different times".to_string(),
            "Research amenities".to_string(),
        ],
        nearby_landmarks: Some(vec![
            format!("{city} Railway Station"),
            "Central Market".to_string(),
            "Government Offices".to_string(),
            "Shopping Area".to_string(),
        ]),
        best_time_to_visit: Some("Morning (9-11 AM) to avoid peak traffic".to_string()),
        local_tips: Some(strings(&[
            "Central areas have better connectivity",
            "Consider traffic for commute",
        ])),
    }
}

/// Replaces each run of whitespace with a single `+`.
fn plus_joined(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join("+")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
