//! Subcommand implementations.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use smarthood_catalog::Catalog;
use smarthood_cli_utils::{MultiProgress, Spinner};
use smarthood_profile_models::UserProfile;
use smarthood_recommend::{
    PipelineConfig, RecommendationPipeline, RecommendationSource, Recommendations,
};

/// Reads a questionnaire profile, warning about blank required fields.
fn load_profile(path: &Path) -> Result<UserProfile, Box<dyn Error>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read profile {}: {e}", path.display()))?;
    let profile: UserProfile = serde_json::from_str(&contents)
        .map_err(|e| format!("Invalid profile {}: {e}", path.display()))?;

    let missing = profile.missing_required_fields();
    if !missing.is_empty() {
        log::warn!("Profile is missing: {}", missing.join(", "));
    }

    Ok(profile)
}

fn pipeline() -> RecommendationPipeline {
    let provider = smarthood_ai::provider_from_env_or_unconfigured();
    RecommendationPipeline::new(Arc::from(provider), PipelineConfig::from_env())
}

/// `smarthood recommend`
pub async fn recommend(
    multi: &MultiProgress,
    profile_path: &Path,
    report_dir: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let profile = load_profile(profile_path)?;
    let pipeline = pipeline();

    let spinner = Spinner::start(multi, "Analyzing neighborhoods...");
    let result = pipeline.generate(&profile).await;
    match &result {
        Ok(recommendations) => spinner.finish(&format!(
            "Found {} neighborhoods",
            recommendations.neighborhoods.len()
        )),
        Err(_) => spinner.finish_and_clear(),
    }
    let recommendations = result?;

    print_recommendations(&profile, &recommendations, json)?;

    if let Some(dir) = report_dir {
        let city = profile.city_or(&pipeline.config().defaults.city);
        let path = write_report(dir, city, &profile, &recommendations)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

/// `smarthood fallback`
pub fn fallback(profile_path: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let profile = load_profile(profile_path)?;
    let recommendations = pipeline().generate_fallback(&profile);
    print_recommendations(&profile, &recommendations, json)
}

/// `smarthood cities`
pub fn cities() {
    for entry in Catalog::builtin().cities() {
        println!(
            "{}, {} ({} neighborhoods)",
            entry.city,
            entry.state,
            entry.neighborhoods.len()
        );
    }
}

fn print_recommendations(
    profile: &UserProfile,
    recommendations: &Recommendations,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&recommendations.neighborhoods)?
        );
        return Ok(());
    }

    if let Some(line) = priorities_line(profile) {
        println!("{line}\n");
    }
    println!("{}", summary(recommendations));
    Ok(())
}

/// Names the top-ranked priorities, e.g. `Top priorities: Safety & Security (9/10)`.
fn priorities_line(profile: &UserProfile) -> Option<String> {
    let top = profile.top_priorities();
    if top.is_empty() {
        return None;
    }

    let named: Vec<String> = top
        .iter()
        .map(|(dimension, rating)| format!("{} ({rating}/10)", dimension.label()))
        .collect();
    Some(format!("Top priorities: {}", named.join(", ")))
}

fn summary(recommendations: &Recommendations) -> String {
    let mut lines = vec![match recommendations.source {
        RecommendationSource::Ai => "Recommendations from the language model:".to_string(),
        RecommendationSource::Fallback => {
            "Recommendations from the curated catalog (model unavailable):".to_string()
        }
    }];

    for (i, n) in recommendations.neighborhoods.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!(
            "{}. {} ({}, {}) - {}% match",
            i + 1,
            n.name,
            n.city,
            n.state,
            n.match_score
        ));
        if let Some(explanation) = &n.explanation {
            lines.push(format!("   {explanation}"));
        }
        for strength in &n.strengths {
            lines.push(format!("   + {strength}"));
        }
        for concern in &n.concerns {
            lines.push(format!("   - {concern}"));
        }
    }

    lines.join("\n")
}

fn write_report(
    dir: &Path,
    city: &str,
    profile: &UserProfile,
    recommendations: &Recommendations,
) -> Result<PathBuf, Box<dyn Error>> {
    let today = chrono::Local::now().date_naive();
    let path = dir.join(smarthood_report::report_file_name(city, today));

    std::fs::create_dir_all(dir)?;
    std::fs::write(
        &path,
        smarthood_report::format_report(profile, &recommendations.neighborhoods, today),
    )?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarthood_neighborhood_models::NeighborhoodRecord;

    #[test]
    fn priorities_line_uses_questionnaire_labels() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "neighborhoodPriorities": {
                "nightlife": [6], "safety": [9], "costOfLiving": [9], "diversity": [2]
            }
        }))
        .unwrap();

        assert_eq!(
            priorities_line(&profile).as_deref(),
            Some(
                "Top priorities: Safety & Security (9/10), Affordability (9/10), \
                 Entertainment & Nightlife (6/10)"
            )
        );
        assert_eq!(priorities_line(&UserProfile::default()), None);
    }

    #[test]
    fn summary_lists_each_neighborhood() {
        let record: NeighborhoodRecord = serde_json::from_value(serde_json::json!({
            "name": "Baner",
            "city": "Pune",
            "state": "Maharashtra",
            "matchScore": 83,
            "strengths": ["Major IT hub"],
            "concerns": ["Traffic congestion"],
        }))
        .unwrap();

        let text = summary(&Recommendations {
            neighborhoods: vec![record],
            source: RecommendationSource::Fallback,
        });

        assert!(text.starts_with("Recommendations from the curated catalog"));
        assert!(text.contains("1. Baner (Pune, Maharashtra) - 83% match"));
        assert!(text.contains("   + Major IT hub\n   - Traffic congestion"));
    }
}
