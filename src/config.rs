use serde::Deserialize;

use crate::services::{MatchWeights, RecommendWeights};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL URL of the marketplace database holding the `templates` table
    #[serde(default)]
    pub database_url: Option<String>,

    /// JSON catalog snapshot, used when no database is configured
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest `limit`/`count` a client may ask for
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// Fixed seed for the tie-break jitter; random per request when unset
    #[serde(default)]
    pub jitter_seed: Option<u64>,

    #[serde(default)]
    pub title_weight: Option<f64>,
    #[serde(default)]
    pub tag_weight: Option<f64>,
    #[serde(default)]
    pub category_weight: Option<f64>,
    #[serde(default)]
    pub keyword_weight: Option<f64>,
    #[serde(default)]
    pub match_jitter: Option<f64>,
    #[serde(default)]
    pub recommend_jitter: Option<f64>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_limit() -> usize {
    50
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the service cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.database_url.is_none() && self.catalog_path.is_none() {
            anyhow::bail!("Either DATABASE_URL or CATALOG_PATH must be set");
        }

        let weights = self.match_weights();
        for (name, value) in [
            ("TITLE_WEIGHT", weights.title),
            ("TAG_WEIGHT", weights.tag),
            ("CATEGORY_WEIGHT", weights.category),
            ("KEYWORD_WEIGHT", weights.keyword),
            ("MATCH_JITTER", weights.jitter),
            ("RECOMMEND_JITTER", self.recommend_weights().jitter),
        ] {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("{} must be a non-negative number, got {}", name, value);
            }
        }

        Ok(())
    }

    /// Keyword matcher weights with any environment overrides applied
    pub fn match_weights(&self) -> MatchWeights {
        let defaults = MatchWeights::default();
        MatchWeights {
            title: self.title_weight.unwrap_or(defaults.title),
            tag: self.tag_weight.unwrap_or(defaults.tag),
            category: self.category_weight.unwrap_or(defaults.category),
            keyword: self.keyword_weight.unwrap_or(defaults.keyword),
            jitter: self.match_jitter.unwrap_or(defaults.jitter),
        }
    }

    pub fn recommend_weights(&self) -> RecommendWeights {
        let defaults = RecommendWeights::default();
        RecommendWeights {
            jitter: self.recommend_jitter.unwrap_or(defaults.jitter),
            ..defaults
        }
    }
}
