//! Orchestrates prompt, completion, extraction and fallback.

use std::sync::Arc;
use std::time::Duration;

use smarthood_ai::{AiError, CompletionProvider};
use smarthood_catalog::Catalog;
use smarthood_profile_models::UserProfile;
use tokio::sync::Semaphore;

use crate::{
    LocationDefaults, RecommendError, RecommendationSource, Recommendations, extract, fallback,
    prompt,
};

/// Default completion deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default cap on concurrent completion calls.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Longest prefix of the raw completion written to the log.
const LOGGED_RESPONSE_CHARS: usize = 500;

/// Pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// City and state used when the profile leaves them blank.
    pub defaults: LocationDefaults,
    /// Deadline for a single completion call, including time spent
    /// waiting for a concurrency permit.
    pub timeout: Duration,
    /// Maximum number of completion calls in flight at once.
    pub max_concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            defaults: LocationDefaults::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl PipelineConfig {
    /// Reads settings from the environment.
    ///
    /// - `SMARTHOOD_DEFAULT_CITY` / `SMARTHOOD_DEFAULT_STATE`
    /// - `AI_TIMEOUT_SECS` (default 60)
    /// - `AI_MAX_CONCURRENCY` (default 8)
    ///
    /// Unset or unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`Self::from_env`], reading variables through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = LocationDefaults::default();
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            defaults: LocationDefaults {
                city: non_blank("SMARTHOOD_DEFAULT_CITY").unwrap_or(defaults.city),
                state: non_blank("SMARTHOOD_DEFAULT_STATE").unwrap_or(defaults.state),
            },
            timeout: Duration::from_secs(
                parsed(&lookup, "AI_TIMEOUT_SECS")
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            max_concurrency: parsed(&lookup, "AI_MAX_CONCURRENCY")
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_CONCURRENCY),
        }
    }
}

fn parsed<T: std::str::FromStr>(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name)?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        log::warn!("Ignoring invalid {name}={raw}");
    }
    parsed
}

/// Recommendation pipeline shared by every request.
pub struct RecommendationPipeline {
    provider: Arc<dyn CompletionProvider>,
    catalog: &'static Catalog,
    config: PipelineConfig,
    permits: Semaphore,
}

impl RecommendationPipeline {
    /// Creates a pipeline over the built-in catalog.
    #[must_use]
    pub fn new(provider: Arc<dyn CompletionProvider>, config: PipelineConfig) -> Self {
        Self::with_catalog(provider, Catalog::builtin(), config)
    }

    /// Creates a pipeline over a specific catalog.
    #[must_use]
    pub fn with_catalog(
        provider: Arc<dyn CompletionProvider>,
        catalog: &'static Catalog,
        config: PipelineConfig,
    ) -> Self {
        let permits = Semaphore::new(config.max_concurrency.max(1));
        Self {
            provider,
            catalog,
            config,
            permits,
        }
    }

    /// Settings in effect.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Catalog used for fallbacks.
    #[must_use]
    pub const fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    /// Produces recommendations for `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::Unavailable`] when no provider is
    /// configured, and [`RecommendError::Generation`] when the provider
    /// fails for any reason other than quota exhaustion, including the
    /// deadline elapsing.
    pub async fn generate(&self, profile: &UserProfile) -> Result<Recommendations, RecommendError> {
        let city = profile.city_or(&self.config.defaults.city);
        let state = profile.state_or(&self.config.defaults.state);
        let prompt = prompt::build_prompt(profile, &self.config.defaults);

        log::info!(
            "Requesting recommendations for {city}, {state} from {}",
            self.provider.name()
        );

        let raw = match self.complete(&prompt).await {
            Ok(raw) => raw,
            Err(AiError::Config { message }) => {
                log::error!("Completion provider not configured: {message}");
                return Err(RecommendError::Unavailable { message });
            }
            Err(e) if e.is_quota() => {
                log::warn!("Provider quota exhausted, using fallback: {e}");
                return Ok(self.fallback(city, state, profile));
            }
            Err(e) => {
                log::error!("Completion failed: {e}");
                return Err(RecommendError::Generation {
                    message: e.to_string(),
                });
            }
        };

        log::debug!(
            "Model response: {}",
            raw.chars().take(LOGGED_RESPONSE_CHARS).collect::<String>()
        );

        match extract::extract(&raw) {
            Ok(neighborhoods) => {
                log::info!("Model returned {} neighborhoods", neighborhoods.len());
                Ok(Recommendations {
                    neighborhoods,
                    source: RecommendationSource::Ai,
                })
            }
            Err(e) => {
                log::warn!("Unusable model response, using fallback: {e}");
                log::debug!("Raw model response: {raw}");
                Ok(self.fallback(city, state, profile))
            }
        }
    }

    /// Produces the deterministic fallback without calling the provider.
    #[must_use]
    pub fn generate_fallback(&self, profile: &UserProfile) -> Recommendations {
        let city = profile.city_or(&self.config.defaults.city);
        let state = profile.state_or(&self.config.defaults.state);
        self.fallback(city, state, profile)
    }

    fn fallback(&self, city: &str, state: &str, profile: &UserProfile) -> Recommendations {
        Recommendations {
            neighborhoods: fallback::synthesize(self.catalog, city, state, profile),
            source: RecommendationSource::Fallback,
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        let call = async {
            let _permit = self.permits.acquire().await.map_err(|e| AiError::Provider {
                message: format!("Completion limiter closed: {e}"),
            })?;
            self.provider.complete(prompt).await
        };

        tokio::time::timeout(self.config.timeout, call)
            .await
            .unwrap_or_else(|_| {
                Err(AiError::Provider {
                    message: format!(
                        "Completion timed out after {}s",
                        self.config.timeout.as_secs()
                    ),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarthood_catalog::Catalog;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Reply {
        Text(&'static str),
        Quota,
        Config,
        Failure,
        Hang,
    }

    struct StubProvider {
        reply: Reply,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete(&self, prompt: &str) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.reply {
                Reply::Text(text) => Ok(text.to_string()),
                Reply::Quota => Err(AiError::QuotaExhausted {
                    message: "429 Too Many Requests".to_string(),
                }),
                Reply::Config => Err(AiError::Config {
                    message: "GOOGLE_AI_API_KEY environment variable not set".to_string(),
                }),
                Reply::Failure => Err(AiError::Provider {
                    message: "HTTP 500 Internal Server Error: boom".to_string(),
                }),
                Reply::Hang => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    fn pipeline(provider: &Arc<StubProvider>) -> RecommendationPipeline {
        RecommendationPipeline::new(provider.clone(), PipelineConfig::default())
    }

    fn profile(value: serde_json::Value) -> UserProfile {
        serde_json::from_value(value).unwrap()
    }

    fn bangalore_family_safety() -> UserProfile {
        profile(serde_json::json!({
            "personalProfile": { "ageRange": "26-35", "income": "10L-15L", "hasChildren": true },
            "locationPreferences": { "city": "Bangalore", "state": "Karnataka" },
            "neighborhoodPriorities": {
                "safety": [9], "schools": [8], "nightlife": [3], "walkability": [6]
            }
        }))
    }

    #[tokio::test]
    async fn model_answer_is_returned_untouched() {
        let provider = StubProvider::new(Reply::Text(
            "```json\n[{\"name\":\"HSR Layout\",\"city\":\"Bangalore\",\"matchScore\":92}]\n```",
        ));
        let result = pipeline(&provider)
            .generate(&bangalore_family_safety())
            .await
            .unwrap();

        assert_eq!(result.source, RecommendationSource::Ai);
        assert_eq!(result.neighborhoods.len(), 1);
        assert_eq!(result.neighborhoods[0].match_score.as_u64(), Some(92));
        assert!(result.neighborhoods[0].strengths.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn quota_exhaustion_serves_adjusted_catalog() {
        let provider = StubProvider::new(Reply::Quota);
        let result = pipeline(&provider)
            .generate(&bangalore_family_safety())
            .await
            .unwrap();

        assert_eq!(result.source, RecommendationSource::Fallback);
        let names: Vec<_> = result.neighborhoods.iter().map(|n| n.name.as_str()).collect();
        let scores: Vec<_> = result
            .neighborhoods
            .iter()
            .filter_map(|n| n.match_score.as_u64())
            .collect();
        assert_eq!(names, vec!["Koramangala", "Indiranagar", "Whitefield"]);
        assert_eq!(scores, vec![94, 90, 87]);
        for n in &result.neighborhoods {
            assert_eq!(n.strengths.len(), 4);
            assert_eq!(n.strengths.last().map(String::as_str), Some("Safe environment"));
        }
    }

    #[tokio::test]
    async fn unusable_answer_serves_generic_fallback() {
        let provider = StubProvider::new(Reply::Text("I cannot help with that."));
        let profile = profile(serde_json::json!({
            "personalProfile": { "hasChildren": true },
            "locationPreferences": { "city": "Atlantis", "state": "Ocean" },
            "neighborhoodPriorities": { "nightlife": [10], "diversity": [9], "walkability": [8], "safety": [2] }
        }));

        let result = pipeline(&provider).generate(&profile).await.unwrap();

        assert_eq!(result.source, RecommendationSource::Fallback);
        assert_eq!(result.neighborhoods.len(), 1);
        let record = &result.neighborhoods[0];
        assert_eq!(record.name, "Atlantis Central");
        assert_eq!(record.match_score.as_u64(), Some(85));
        assert_eq!(record.school_rating(), Some(8.0));
        assert_eq!(
            record.strengths.last().map(String::as_str),
            Some("Good schools and family amenities")
        );
    }

    #[tokio::test]
    async fn missing_configuration_is_not_masked() {
        let provider = StubProvider::new(Reply::Config);
        let err = pipeline(&provider)
            .generate(&UserProfile::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RecommendError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn other_failures_propagate() {
        let provider = StubProvider::new(Reply::Failure);
        let err = pipeline(&provider)
            .generate(&UserProfile::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RecommendError::Generation { .. }));
        assert!(err.details().contains("boom"));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_is_a_generation_error() {
        let provider = StubProvider::new(Reply::Hang);
        let pipeline = RecommendationPipeline::new(
            provider.clone(),
            PipelineConfig {
                timeout: Duration::from_secs(5),
                ..PipelineConfig::default()
            },
        );

        let err = pipeline.generate(&UserProfile::default()).await.unwrap_err();
        assert!(matches!(err, RecommendError::Generation { ref message } if message.contains("timed out")));
    }

    #[tokio::test]
    async fn blank_city_uses_configured_default() {
        let provider = StubProvider::new(Reply::Quota);
        let pipeline = RecommendationPipeline::new(
            provider.clone(),
            PipelineConfig {
                defaults: LocationDefaults {
                    city: "Pune".to_string(),
                    state: "Maharashtra".to_string(),
                },
                ..PipelineConfig::default()
            },
        );

        let result = pipeline.generate(&UserProfile::default()).await.unwrap();

        assert_eq!(result.neighborhoods[0].name, "Koregaon Park");
        let prompts = provider.prompts.lock().unwrap();
        assert!(prompts[0].starts_with("Generate 3 REAL neighborhoods in Pune, Maharashtra"));
    }

    #[tokio::test]
    async fn output_is_never_empty() {
        let replies = [
            Reply::Text("[]"),
            Reply::Text("[{\"name\":\"\",\"city\":\"X\",\"matchScore\":1}]"),
            Reply::Text("{\"name\":\"X\"}"),
            Reply::Quota,
        ];
        for reply in replies {
            let provider = StubProvider::new(reply);
            let result = pipeline(&provider)
                .generate(&UserProfile::default())
                .await
                .unwrap();
            assert!(!result.neighborhoods.is_empty());
            assert!(result.neighborhoods.iter().all(|n| n.is_complete()));
        }
    }

    #[test]
    fn fallback_only_skips_the_provider() {
        let provider = StubProvider::new(Reply::Failure);
        let result = RecommendationPipeline::with_catalog(
            provider.clone(),
            Catalog::builtin(),
            PipelineConfig::default(),
        )
        .generate_fallback(&UserProfile::default());

        assert_eq!(result.source, RecommendationSource::Fallback);
        assert_eq!(result.neighborhoods[0].city, "Mumbai");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    struct GaugeProvider {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl CompletionProvider for GaugeProvider {
        async fn complete(&self, _prompt: &str) -> Result<String, AiError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_secs(1)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(r#"[{"name":"Baner","city":"Pune","matchScore":83}]"#.to_string())
        }

        fn name(&self) -> &'static str {
            "gauge"
        }
    }

    async fn peak_in_flight(max_concurrency: usize) -> usize {
        let provider = Arc::new(GaugeProvider {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let pipeline = RecommendationPipeline::new(
            provider.clone(),
            PipelineConfig {
                max_concurrency,
                ..PipelineConfig::default()
            },
        );
        let profile = UserProfile::default();

        let (first, second) = tokio::join!(pipeline.generate(&profile), pipeline.generate(&profile));
        assert_eq!(first.unwrap().source, RecommendationSource::Ai);
        assert_eq!(second.unwrap().source, RecommendationSource::Ai);

        provider.peak.load(Ordering::SeqCst)
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_calls_never_exceed_the_cap() {
        assert_eq!(peak_in_flight(1).await, 1);
        assert_eq!(peak_in_flight(2).await, 2);
    }

    #[test]
    fn config_reads_overrides() {
        let config = PipelineConfig::from_lookup(|name| {
            match name {
                "SMARTHOOD_DEFAULT_CITY" => Some("Pune"),
                "SMARTHOOD_DEFAULT_STATE" => Some("Maharashtra"),
                "AI_TIMEOUT_SECS" => Some(" 15 "),
                "AI_MAX_CONCURRENCY" => Some("2"),
                _ => None,
            }
            .map(str::to_string)
        });

        assert_eq!(config.defaults.city, "Pune");
        assert_eq!(config.defaults.state, "Maharashtra");
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.max_concurrency, 2);
    }

    #[test]
    fn config_ignores_blank_zero_and_invalid_values() {
        let config = PipelineConfig::from_lookup(|name| {
            match name {
                "SMARTHOOD_DEFAULT_CITY" => Some("   "),
                "AI_TIMEOUT_SECS" => Some("0"),
                "AI_MAX_CONCURRENCY" => Some("lots"),
                _ => None,
            }
            .map(str::to_string)
        });

        assert_eq!(config, PipelineConfig::default());
    }
}
