use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// PostgreSQL URL, or "memory" for the in-process store
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

impl DatabaseSettings {
    pub fn is_in_memory(&self) -> bool {
        self.url == "memory"
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_pool_with_interests")]
    pub candidate_pool_with_interests: usize,
    #[serde(default = "default_pool_without_interests")]
    pub candidate_pool_without_interests: usize,
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_limit")]
    pub max_limit: u16,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            candidate_pool_with_interests: default_pool_with_interests(),
            candidate_pool_without_interests: default_pool_without_interests(),
            default_limit: default_limit(),
            max_limit: default_limit(),
        }
    }
}

impl MatchingSettings {
    /// Resolve the requested result count against the configured default and cap
    pub fn effective_limit(&self, requested: Option<u16>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit) as usize
    }

    /// How many candidates to pull from the store for a viewer
    pub fn pool_size(&self, viewer_has_interests: bool) -> usize {
        if viewer_has_interests {
            self.candidate_pool_with_interests
        } else {
            self.candidate_pool_without_interests
        }
    }
}

fn default_pool_with_interests() -> usize { 50 }
fn default_pool_without_interests() -> usize { 100 }
fn default_limit() -> u16 { 10 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_visited_weight")]
    pub visited: f64,
    #[serde(default = "default_max_shared_interests")]
    pub max_shared_interests: usize,
    #[serde(default = "default_max_shared_visited")]
    pub max_shared_visited: usize,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            interests: default_interests_weight(),
            location: default_location_weight(),
            visited: default_visited_weight(),
            max_shared_interests: default_max_shared_interests(),
            max_shared_visited: default_max_shared_visited(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            interests: config.interests,
            location: config.location,
            visited: config.visited,
            max_shared_interests: config.max_shared_interests,
            max_shared_visited: config.max_shared_visited,
        }
    }
}

fn default_interests_weight() -> f64 { 60.0 }
fn default_location_weight() -> f64 { 20.0 }
fn default_visited_weight() -> f64 { 20.0 }
fn default_max_shared_interests() -> usize { 7 }
fn default_max_shared_visited() -> usize { 3 }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TRAVNER_)
    /// 5. DATABASE_URL, if set
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TRAVNER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("TRAVNER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(database_url) = std::env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("TRAVNER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
