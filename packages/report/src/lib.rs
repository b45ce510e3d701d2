#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Plain-text report export.
//!
//! Renders a questionnaire profile and its recommended neighborhoods as
//! the downloadable text report. Absent values render as `N/A`.

use chrono::NaiveDate;
use smarthood_neighborhood_models::{NeighborhoodRecord, Number};
use smarthood_profile_models::UserProfile;

const NOT_AVAILABLE: &str = "N/A";
const INDENT: &str = "   ";
const SECTION_RULE_WIDTH: usize = 50;

/// Builds the report file name, e.g. `SmartHood_Report_Pune_2026-10-18.txt`.
#[must_use]
pub fn report_file_name(city: &str, date: NaiveDate) -> String {
    format!("SmartHood_Report_{city}_{}.txt", date.format("%Y-%m-%d"))
}

/// Renders the full report.
#[must_use]
pub fn format_report(
    profile: &UserProfile,
    neighborhoods: &[NeighborhoodRecord],
    generated_on: NaiveDate,
) -> String {
    let personal = &profile.personal_profile;
    let location = &profile.location_preferences;

    let mut lines = vec![
        String::new(),
        "SMARTHOOD AI - NEIGHBORHOOD ANALYSIS REPORT".to_string(),
        "==========================================".to_string(),
        String::new(),
        format!("Generated on: {}", generated_on.format("%Y-%m-%d")),
        format!(
            "Location: {}, {}",
            or_na(&location.city),
            or_na(&location.state)
        ),
        String::new(),
    ];

    heading(&mut lines, "PERSONAL PROFILE");
    lines.push(format!("Age Range: {}", or_na(&personal.age_range)));
    lines.push(format!("Household Size: {}", or_na(&personal.household_size)));
    lines.push(format!("Annual Income: {}", or_na(&personal.income)));
    lines.push(format!("Has Children: {}", yes_no(personal.has_children)));
    lines.push(format!("Has Pets: {}", yes_no(personal.has_pets)));
    lines.push(String::new());

    heading(&mut lines, "TOP NEIGHBORHOOD MATCHES");

    for (index, neighborhood) in neighborhoods.iter().enumerate() {
        if index > 0 {
            lines.push("=".repeat(SECTION_RULE_WIDTH));
        }
        lines.push(String::new());
        neighborhood_section(&mut lines, index + 1, neighborhood);
        lines.push(String::new());
    }

    lines.push(String::new());
    heading(&mut lines, "ASSESSMENT SUMMARY");
    lines.push(
        "This report was generated based on your comprehensive lifestyle assessment. \
         The neighborhoods listed above have been ranked according to their compatibility \
         with your stated preferences and priorities."
            .to_string(),
    );
    lines.push(String::new());
    lines.push(
        "For the most up-to-date information, please visit the neighborhoods in person \
         and verify current rental rates and amenities."
            .to_string(),
    );
    lines.push(String::new());
    lines.push(
        "Report generated by SmartHood AI - Intelligent Neighborhood Discovery Platform"
            .to_string(),
    );

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

fn neighborhood_section(lines: &mut Vec<String>, rank: usize, n: &NeighborhoodRecord) {
    lines.push(format!("{rank}. {}", n.name.to_uppercase()));
    lines.push(format!("{INDENT}Location: {}, {}", n.city, or_na(&n.state)));
    lines.push(format!("{INDENT}Area: {}", opt_or_na(n.area.as_deref())));
    lines.push(format!("{INDENT}Pincode: {}", opt_or_na(n.pincode.as_deref())));
    lines.push(format!("{INDENT}Match Score: {}%", n.match_score));

    list_block(lines, "STRENGTHS", Some(n.strengths.as_slice()));
    list_block(lines, "CONSIDERATIONS", Some(n.concerns.as_slice()));

    block_title(lines, "COST BREAKDOWN (Monthly)");
    let cost = n.cost_breakdown.clone().unwrap_or_default();
    for (label, amount) in [
        ("1 BHK Rent", cost.rent_1bhk),
        ("2 BHK Rent", cost.rent_2bhk),
        ("3 BHK Rent", cost.rent_3bhk),
        ("Groceries", cost.grocery_cost_per_month),
        ("Dining Out (Avg)", cost.dining_out_average),
        ("Utilities", cost.utilities_per_month),
    ] {
        bullet(lines, &format!("{label}: {}", rupees(amount.as_ref())));
    }

    block_title(lines, "LIFESTYLE SCORES");
    match &n.lifestyle {
        Some(lifestyle) => {
            let walk = lifestyle.walk_score.as_ref().map(ToString::to_string);
            let transit = lifestyle.transit_score.as_ref().map(ToString::to_string);
            let safety = n.safety_score().map(|safety| format!("{safety:.1}"));
            let schools = n.school_rating().map(|rating| rating.to_string());

            bullet(lines, &format!("Walkability: {}", out_of(walk, 100)));
            bullet(lines, &format!("Public Transit: {}", out_of(transit, 100)));
            bullet(lines, &format!("Safety: {}", out_of(safety, 10)));
            bullet(lines, &format!("Schools: {}", out_of(schools, 10)));
        }
        None => bullet(lines, NOT_AVAILABLE),
    }

    block_title(lines, "AMENITIES");
    match &n.amenities {
        Some(amenities) => {
            for (label, count) in [
                ("Restaurants", &amenities.restaurants),
                ("Parks", &amenities.parks),
                ("Gyms", &amenities.gyms),
                ("Grocery Stores", &amenities.grocery_stores),
                ("Entertainment", &amenities.entertainment),
            ] {
                bullet(lines, &format!("{label}: {}", value(count.as_ref())));
            }
        }
        None => bullet(lines, NOT_AVAILABLE),
    }

    block_title(lines, "AI INSIGHTS");
    lines.push(format!("{INDENT}{}", opt_or_na(n.ai_insights.as_deref())));

    list_block(lines, "RECOMMENDED ACTIONS", Some(n.recommended_actions.as_slice()));
    list_block(lines, "NEARBY LANDMARKS", n.nearby_landmarks.as_deref());
    list_block(lines, "LOCAL TIPS", n.local_tips.as_deref());

    lines.push(String::new());
    lines.push(format!(
        "{INDENT}Google Maps: {}",
        opt_or_na(n.google_maps_url.as_deref())
    ));
}

fn heading(lines: &mut Vec<String>, title: &str) {
    lines.push(title.to_string());
    lines.push("=".repeat(title.len()));
}

fn block_title(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(format!("{INDENT}{title}:"));
}

fn bullet(lines: &mut Vec<String>, text: &str) {
    lines.push(format!("{INDENT}\u{2022} {text}"));
}

fn list_block(lines: &mut Vec<String>, title: &str, items: Option<&[String]>) {
    block_title(lines, title);
    match items {
        Some(items) if !items.is_empty() => {
            for item in items {
                bullet(lines, item);
            }
        }
        _ => bullet(lines, NOT_AVAILABLE),
    }
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}

fn opt_or_na(value: Option<&str>) -> &str {
    value.map_or(NOT_AVAILABLE, or_na)
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn out_of(score: Option<String>, scale: u32) -> String {
    score.map_or_else(|| NOT_AVAILABLE.to_string(), |score| format!("{score}/{scale}"))
}

/// Renders a wire number, or `N/A` when absent.
fn value(number: Option<&Number>) -> String {
    number.map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string)
}

/// Formats a rupee amount with comma thousands separators. Fractional
/// amounts are rounded to whole rupees.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rupees(amount: Option<&Number>) -> String {
    let whole = amount.and_then(|n| {
        n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.round() as u64)
        })
    });
    whole.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |amount| format!("\u{20b9}{}", with_thousands(amount)),
    )
}

fn with_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarthood_catalog::Catalog;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn profile() -> UserProfile {
        serde_json::from_value(serde_json::json!({
            "personalProfile": {
                "ageRange": "26-35", "householdSize": "2", "income": "10L-15L",
                "hasChildren": true
            },
            "locationPreferences": { "city": "Mumbai", "state": "Maharashtra" }
        }))
        .unwrap()
    }

    #[test]
    fn file_name_uses_iso_date() {
        assert_eq!(
            report_file_name("Mumbai", date()),
            "SmartHood_Report_Mumbai_2026-10-18.txt"
        );
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(with_thousands(0), "0");
        assert_eq!(with_thousands(800), "800");
        assert_eq!(with_thousands(45_000), "45,000");
        assert_eq!(with_thousands(1_200_000), "1,200,000");
    }

    #[test]
    fn renders_catalog_neighborhoods() {
        let records = &Catalog::builtin().get("Mumbai").unwrap().neighborhoods;
        let report = format_report(&profile(), records, date());

        assert!(report.contains("Generated on: 2026-10-18"));
        assert!(report.contains("Location: Mumbai, Maharashtra"));
        assert!(report.contains("Has Children: Yes\nHas Pets: No"));
        assert!(report.contains("1. BANDRA WEST\n   Location: Mumbai, Maharashtra"));
        assert!(report.contains("   Match Score: 89%"));
        assert!(report.contains("   \u{2022} 1 BHK Rent: \u{20b9}45,000"));
        assert!(report.contains("   \u{2022} 3 BHK Rent: \u{20b9}120,000"));
        assert!(report.contains("   \u{2022} Safety: 7.9/10"));
        assert!(report.contains("   \u{2022} Schools: 9/10"));
        assert!(report.contains(&format!("\n{}\n\n2. POWAI", "=".repeat(50))));
        assert!(report.contains("3. ANDHERI EAST"));
        assert!(report.ends_with("Intelligent Neighborhood Discovery Platform\n"));
    }

    #[test]
    fn partial_groups_render_present_values() {
        let record: NeighborhoodRecord = serde_json::from_value(serde_json::json!({
            "name": "HSR Layout",
            "city": "Bangalore",
            "matchScore": 91.5,
            "lifestyle": { "walkScore": 82.5, "crimeRate": 1.9, "schoolRating": 8.5 },
            "costBreakdown": { "rent1BHK": 24999.6, "rent2BHK": "38000" },
        }))
        .unwrap();

        let report = format_report(&UserProfile::default(), &[record], date());

        assert!(report.contains("   Match Score: 91.5%"));
        assert!(report.contains("   \u{2022} Walkability: 82.5/100"));
        assert!(report.contains("   \u{2022} Public Transit: N/A\n"));
        assert!(report.contains("   \u{2022} Safety: 8.1/10"));
        assert!(report.contains("   \u{2022} Schools: 8.5/10"));
        assert!(report.contains("   \u{2022} 1 BHK Rent: \u{20b9}25,000"));
        assert!(report.contains("   \u{2022} 2 BHK Rent: \u{20b9}38,000"));
        assert!(report.contains("   \u{2022} 3 BHK Rent: N/A"));
    }

    #[test]
    fn absent_groups_render_as_na() {
        let record: NeighborhoodRecord = serde_json::from_value(serde_json::json!({
            "name": "Baner",
            "city": "Pune",
            "matchScore": 83,
        }))
        .unwrap();

        let report = format_report(&UserProfile::default(), &[record], date());

        assert!(report.contains("Location: N/A, N/A"));
        assert!(report.contains("   Area: N/A"));
        assert!(report.contains("   \u{2022} Utilities: N/A"));
        assert!(report.contains("   LIFESTYLE SCORES:\n   \u{2022} N/A"));
        assert!(report.contains("   LOCAL TIPS:\n   \u{2022} N/A"));
        assert!(report.contains("   Google Maps: N/A"));
        assert!(!report.contains(&"=".repeat(50)));
    }
}
