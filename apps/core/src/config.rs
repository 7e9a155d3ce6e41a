//! Engine configuration.
//!
//! Tier thresholds and factor weights are configuration data. The defaults are
//! the reference table; deployments override them through environment
//! variables (optionally from a `.env` file) and a JSON tier-table file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::engine::{AioConfig, AioWeights, KeywordEngine, PriorityConfig};
use crate::error::AppError;

/// Path to a JSON array of tier rows.
pub const ENV_TIERS_FILE: &str = "KEYWORD_ENGINE_TIERS_FILE";
/// Four comma-separated factor weights.
pub const ENV_AIO_WEIGHTS: &str = "KEYWORD_ENGINE_AIO_WEIGHTS";
pub const ENV_RECOMMENDATION_THRESHOLD: &str = "KEYWORD_ENGINE_RECOMMENDATION_THRESHOLD";
/// `pretty` or `bunyan`.
pub const ENV_LOG_FORMAT: &str = "KEYWORD_ENGINE_LOG_FORMAT";

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// Bunyan-compatible JSON lines
    Bunyan,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "bunyan" | "json" => Ok(LogFormat::Bunyan),
            other => Err(AppError::Config(format!("unknown log format: {}", other))),
        }
    }
}

/// Complete, validated engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngineConfig {
    pub priority: PriorityConfig,
    pub aio: AioConfig,
    pub log_format: LogFormat,
}

impl EngineConfig {
    /// Load configuration from the environment, reading `.env` first if present.
    ///
    /// Unset variables fall back to the reference defaults; malformed values
    /// are reported as `AppError::Config`.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();

        let mut config = Self::default();

        if let Ok(path) = std::env::var(ENV_TIERS_FILE) {
            config.priority = load_tiers_file(&path)?;
            info!("Loaded priority tiers from {}", path);
        }

        if let Ok(raw) = std::env::var(ENV_AIO_WEIGHTS) {
            config.aio.weights = AioWeights::parse(&raw)?;
        }

        if let Ok(raw) = std::env::var(ENV_RECOMMENDATION_THRESHOLD) {
            config.aio.recommendation_threshold = raw.trim().parse::<u8>().map_err(|e| {
                AppError::Config(format!(
                    "{} must be an integer 0-100, got {:?}: {}",
                    ENV_RECOMMENDATION_THRESHOLD, raw, e
                ))
            })?;
        }

        if let Ok(raw) = std::env::var(ENV_LOG_FORMAT) {
            config.log_format = raw.parse()?;
        }

        config.aio.validate()?;
        Ok(config)
    }

    /// Build the engine this configuration describes.
    pub fn engine(&self) -> KeywordEngine {
        KeywordEngine::new(self.priority.clone(), self.aio)
    }
}

/// Read and validate a JSON tier table from disk.
pub fn load_tiers_file(path: impl AsRef<Path>) -> Result<PriorityConfig, AppError> {
    let json = fs::read_to_string(path.as_ref())?;
    PriorityConfig::from_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("BUNYAN".parse::<LogFormat>().unwrap(), LogFormat::Bunyan);
        assert_eq!(" json ".parse::<LogFormat>().unwrap(), LogFormat::Bunyan);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_default_engine_uses_reference_tiers() {
        let engine = EngineConfig::default().engine();
        assert_eq!(engine.list_configuration().len(), 6);
        assert_eq!(engine.tier_info(crate::engine::PriorityTier::P0).min_volume, 100_000);
    }
}
