use serde::Deserialize;
use std::collections::HashSet;

use crate::engine::{
    EngineSettings, StopWords, DEFAULT_DEGRADED_FALLBACK_COUNT, DEFAULT_MAX_RESULTS,
    DEFAULT_MIN_MATCH_SCORE, DEFAULT_NEW_USER_FALLBACK_COUNT, DEFAULT_OVERLAP_COUNT,
};
use crate::models::ItemId;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON catalog file, either an array of books or `{"books": [...]}`
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Similarity results must score strictly above this percentage
    #[serde(default = "default_min_match_score")]
    pub min_match_score: f64,

    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Default listing size for users without query or known history
    #[serde(default = "default_new_user_fallback_count")]
    pub new_user_fallback_count: usize,

    /// Default listing size when the catalog cannot be vectorized
    #[serde(default = "default_degraded_fallback_count")]
    pub degraded_fallback_count: usize,

    /// Genre-overlap listing size for empty histories
    #[serde(default = "default_overlap_default_count")]
    pub overlap_default_count: usize,

    /// Comma-separated words excluded in addition to the built-in list
    #[serde(default)]
    pub extra_stop_words: Vec<String>,

    /// Keep the fitted model between requests while the catalog is unchanged
    #[serde(default = "default_cache_model")]
    pub cache_model: bool,

    /// Comma-separated item ids used as history when a request has none
    #[serde(default)]
    pub default_history: Vec<ItemId>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_catalog_path() -> String {
    "database.json".to_string()
}

fn default_min_match_score() -> f64 {
    DEFAULT_MIN_MATCH_SCORE
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_new_user_fallback_count() -> usize {
    DEFAULT_NEW_USER_FALLBACK_COUNT
}

fn default_degraded_fallback_count() -> usize {
    DEFAULT_DEGRADED_FALLBACK_COUNT
}

fn default_overlap_default_count() -> usize {
    DEFAULT_OVERLAP_COUNT
}

fn default_cache_model() -> bool {
    true
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            min_match_score: self.min_match_score,
            max_results: self.max_results,
            new_user_fallback_count: self.new_user_fallback_count,
            degraded_fallback_count: self.degraded_fallback_count,
            overlap_default_count: self.overlap_default_count,
        }
    }

    pub fn stop_words(&self) -> StopWords {
        StopWords::spanish().extended(&self.extra_stop_words)
    }

    pub fn default_history(&self) -> HashSet<ItemId> {
        self.default_history.iter().copied().collect()
    }
}
