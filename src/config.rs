use std::env;
use std::time::Duration;

/// Default football-data.org REST endpoint.
pub const DEFAULT_FOOTBALL_DATA_URL: &str = "https://api.football-data.org/v4";

/// Competitions used by batch predictions, curated picks and team search.
/// Premier League, La Liga, Serie A, Bundesliga, Ligue 1.
pub const DEFAULT_COMPETITIONS: &[&str] = &["PL", "PD", "SA", "BL1", "FL1"];

/// Tunables for the prediction pipeline.
#[derive(Debug, Clone)]
pub struct PredictionConfig {
    /// Home advantage applied in direct-stats mode (fraction, default 0.05).
    pub home_advantage: f64,
    /// Deadline for collecting one match's signals (ms).
    pub pipeline_timeout_ms: u64,
    /// Seed for the variance source. Unseeded runs use the thread RNG.
    pub variance_seed: Option<u64>,
    /// TTL of the upcoming-predictions board (seconds).
    pub predictions_ttl_secs: u64,
    /// TTL of the curated picks (seconds).
    pub curated_picks_ttl_secs: u64,
    /// TTL of the memoized team list (seconds).
    pub team_list_ttl_secs: u64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            home_advantage: 0.05,
            pipeline_timeout_ms: 8_000,
            variance_seed: None,
            predictions_ttl_secs: 3_600,
            curated_picks_ttl_secs: 300,
            team_list_ttl_secs: 86_400,
        }
    }
}

impl PredictionConfig {
    pub fn pipeline_timeout(&self) -> Duration {
        Duration::from_millis(self.pipeline_timeout_ms)
    }

    pub fn predictions_ttl(&self) -> Duration {
        Duration::from_secs(self.predictions_ttl_secs)
    }

    pub fn curated_picks_ttl(&self) -> Duration {
        Duration::from_secs(self.curated_picks_ttl_secs)
    }

    pub fn team_list_ttl(&self) -> Duration {
        Duration::from_secs(self.team_list_ttl_secs)
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Redis URL for the prediction cache. In-process store when unset.
    pub redis_url: Option<String>,
    /// football-data.org API key.
    pub football_data_api_key: Option<String>,
    /// football-data.org base URL.
    pub football_data_api_url: String,
    /// HTTP timeout for upstream calls (ms).
    pub upstream_timeout_ms: u64,
    /// Target competition codes.
    pub competitions: Vec<String>,
    /// Prediction pipeline settings.
    pub prediction: PredictionConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PredictionConfig::default();

        // Format: "PL,PD,SA"
        let competitions: Vec<String> = lookup("COMPETITIONS")
            .map(|s| {
                s.split(',')
                    .map(|c| c.trim().to_uppercase())
                    .filter(|c| !c.is_empty())
                    .collect()
            })
            .filter(|list: &Vec<String>| !list.is_empty())
            .unwrap_or_else(|| DEFAULT_COMPETITIONS.iter().map(|c| c.to_string()).collect());

        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            redis_url: lookup("REDIS_URL").filter(|url| !url.is_empty()),
            football_data_api_key: lookup("FOOTBALL_DATA_API_KEY").filter(|key| !key.is_empty()),
            football_data_api_url: lookup("FOOTBALL_DATA_API_URL")
                .unwrap_or_else(|| DEFAULT_FOOTBALL_DATA_URL.to_string()),
            upstream_timeout_ms: lookup("UPSTREAM_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            competitions,
            prediction: PredictionConfig {
                home_advantage: lookup("HOME_ADVANTAGE")
                    .and_then(|v| v.parse::<f64>().ok())
                    .filter(|v| v.is_finite() && (0.0..=0.5).contains(v))
                    .unwrap_or(defaults.home_advantage),
                pipeline_timeout_ms: lookup("PIPELINE_TIMEOUT_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.pipeline_timeout_ms),
                variance_seed: lookup("VARIANCE_SEED").and_then(|v| v.parse().ok()),
                predictions_ttl_secs: lookup("PREDICTIONS_TTL_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.predictions_ttl_secs),
                curated_picks_ttl_secs: lookup("CURATED_PICKS_TTL_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.curated_picks_ttl_secs),
                team_list_ttl_secs: lookup("TEAM_LIST_TTL_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.team_list_ttl_secs),
            },
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
