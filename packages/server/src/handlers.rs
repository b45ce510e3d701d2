//! HTTP handler functions for the SmartHood API.

use actix_web::{HttpResponse, web};
use smarthood_profile_models::UserProfile;
use smarthood_recommend::RecommendError;
use smarthood_server_models::{
    ApiCity, ApiError, ApiHealth, GENERATION_ERROR, RECOMMENDATION_SOURCE_HEADER,
    UNAVAILABLE_ERROR,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/cities`
///
/// Lists the cities with curated fallback neighborhoods.
pub async fn cities(state: web::Data<AppState>) -> HttpResponse {
    let cities: Vec<ApiCity> = state
        .pipeline
        .catalog()
        .cities()
        .map(ApiCity::from)
        .collect();

    HttpResponse::Ok().json(cities)
}

/// `POST /api/generate-results`
///
/// Generates neighborhood recommendations for a questionnaire profile.
pub async fn generate_results(
    state: web::Data<AppState>,
    profile: web::Json<UserProfile>,
) -> HttpResponse {
    let profile = profile.into_inner();

    match state.pipeline.generate(&profile).await {
        Ok(recommendations) => HttpResponse::Ok()
            .insert_header((
                RECOMMENDATION_SOURCE_HEADER,
                recommendations.source.to_string(),
            ))
            .json(recommendations.neighborhoods),
        Err(e @ RecommendError::Unavailable { .. }) => {
            log::error!("Failed to generate recommendations: {e}");
            HttpResponse::ServiceUnavailable()
                .json(ApiError::with_details(UNAVAILABLE_ERROR, e.details()))
        }
        Err(e @ RecommendError::Generation { .. }) => {
            log::error!("Failed to generate recommendations: {e}");
            HttpResponse::InternalServerError()
                .json(ApiError::with_details(GENERATION_ERROR, e.details()))
        }
    }
}
