use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::backend::RowFilter;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ResetConfig {
    pub backend: BackendConfig,
    pub reset: ResetOptions,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://<ref>.supabase.co`.
    pub url: String,
    /// Sent as both the `apikey` header and the bearer token.
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ResetOptions {
    pub purge_photos: bool,
    pub bucket: String,
    pub delete_strategy: DeleteStrategy,
    pub min_id: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

/// How a "delete every row" request selects its rows.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeleteStrategy {
    /// `id=gte.<min_id>`. PostgREST refuses a DELETE without a filter, so
    /// this is the default.
    #[default]
    Range,
    /// No predicate at all, for backends that allow it.
    Unfiltered,
}

impl Default for ResetOptions {
    fn default() -> Self {
        Self {
            purge_photos: true,
            bucket: "car-images".into(),
            delete_strategy: DeleteStrategy::default(),
            min_id: uuid::Uuid::nil().to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

/// Returns `~/.derby-reset/`
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".derby-reset")
}

/// Returns the default config file path: `~/.derby-reset/config.toml`
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

impl ResetConfig {
    /// Load config from the default TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            ResetConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (SUPABASE_URL, SUPABASE_KEY, DERBY_RESET_BUCKET, DERBY_RESET_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SUPABASE_URL") {
            self.backend.url = val;
        }
        if let Ok(val) = std::env::var("SUPABASE_KEY") {
            self.backend.api_key = val;
        }
        if let Ok(val) = std::env::var("DERBY_RESET_BUCKET") {
            self.reset.bucket = val;
        }
        if let Ok(val) = std::env::var("DERBY_RESET_LOG_LEVEL") {
            self.logging.level = val;
        }
    }

    /// Fail early if the backend can't be reached with this config.
    pub fn validate(&self) -> Result<()> {
        if self.backend.url.trim().is_empty() {
            bail!("backend URL is not set (use [backend] url or SUPABASE_URL)");
        }
        if self.backend.api_key.trim().is_empty() {
            bail!("backend API key is not set (use [backend] api_key or SUPABASE_KEY)");
        }
        if self.reset.purge_photos && self.reset.bucket.trim().is_empty() {
            bail!("photo purge is enabled but no bucket is configured");
        }
        if self.reset.delete_strategy == DeleteStrategy::Range && self.reset.min_id.is_empty() {
            bail!("range delete strategy needs a non-empty min_id");
        }
        Ok(())
    }

    /// The filter every table delete is issued with.
    pub fn row_filter(&self) -> RowFilter {
        match self.reset.delete_strategy {
            DeleteStrategy::Range => RowFilter::IdAtLeast(self.reset.min_id.clone()),
            DeleteStrategy::Unfiltered => RowFilter::Unfiltered,
        }
    }
}
