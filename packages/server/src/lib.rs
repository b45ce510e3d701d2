#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for SmartHood neighborhood recommendations.
//!
//! Accepts a lifestyle questionnaire profile on
//! `POST /api/generate-results` and answers with recommended
//! neighborhoods, either from the configured language model or from the
//! built-in catalog when the model is saturated or unusable. Also serves
//! a health check and the list of catalogued cities.

mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, error, middleware, web};
use smarthood_recommend::{PipelineConfig, RecommendationPipeline};
use smarthood_server_models::ApiError;

/// Shared application state.
pub struct AppState {
    /// Recommendation pipeline, including the completion provider and the
    /// fallback catalog.
    pub pipeline: Arc<RecommendationPipeline>,
}

impl AppState {
    /// Builds the state from environment variables.
    ///
    /// A missing provider credential does not prevent startup; requests
    /// fail with a configuration error until one is supplied.
    #[must_use]
    pub fn from_env() -> Self {
        let provider = smarthood_ai::provider_from_env_or_unconfigured();
        let config = PipelineConfig::from_env();

        log::info!(
            "Pipeline: default location {}, {}; timeout {}s; max {} concurrent completions",
            config.defaults.city,
            config.defaults.state,
            config.timeout.as_secs(),
            config.max_concurrency
        );

        Self {
            pipeline: Arc::new(RecommendationPipeline::new(Arc::from(provider), config)),
        }
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected request body: {err}");
        let response = HttpResponse::BadRequest()
            .json(ApiError::with_details("Invalid assessment data", err.to_string()));
        error::InternalError::from_response(err, response).into()
    });

    cfg.service(
        web::scope("/api")
            .app_data(json_config)
            .route("/health", web::get().to(handlers::health))
            .route("/cities", web::get().to(handlers::cities))
            .route("/generate-results", web::post().to(handlers::generate_results)),
    );
}

/// Starts the SmartHood API server.
///
/// Builds the recommendation pipeline from the environment and starts the
/// Actix-Web HTTP server on `BIND_ADDR:PORT` (default `127.0.0.1:8080`).
/// This is a regular async function; the caller is responsible for
/// providing the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    let state = web::Data::new(AppState::from_env());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
