//! Main application configuration
//!
//! This module defines the primary configuration structures for the courtside
//! rating pipeline, including TOML file loading, environment variable
//! overrides and validation.

use crate::config::rating::EloSettings;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub paths: PathSettings,
    pub elo: EloSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Input and output file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Canonical games table (CSV) to process
    pub games_csv: PathBuf,
    /// Augmented games table written after a run
    pub rated_csv: PathBuf,
    /// Markdown report for the current season's games
    pub season_report_md: PathBuf,
    /// Markdown report for the latest standings
    pub standings_md: PathBuf,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "courtside".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            games_csv: PathBuf::from("data/nba_games.csv"),
            rated_csv: PathBuf::from("data/nba_latest_elo.csv"),
            season_report_md: PathBuf::from("nba_season_elo_table.md"),
            standings_md: PathBuf::from("nba_latest_elo_table.md"),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional TOML file, then apply environment
    /// variable overrides and validate
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?
            }
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Apply environment variable overrides on top of the current values
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(log_level) = env::var("COURTSIDE_LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Ok(path) = env::var("COURTSIDE_GAMES_CSV") {
            self.paths.games_csv = PathBuf::from(path);
        }
        if let Ok(path) = env::var("COURTSIDE_RATED_CSV") {
            self.paths.rated_csv = PathBuf::from(path);
        }
        if let Ok(k) = env::var("COURTSIDE_K_FACTOR") {
            self.elo.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid COURTSIDE_K_FACTOR value: {}", k))?;
        }
        if let Ok(bonus) = env::var("COURTSIDE_HOME_ADVANTAGE") {
            self.elo.home_advantage = bonus
                .parse()
                .map_err(|_| anyhow!("Invalid COURTSIDE_HOME_ADVANTAGE value: {}", bonus))?;
        }
        if let Ok(retention) = env::var("COURTSIDE_RETENTION_FACTOR") {
            self.elo.retention_factor = retention
                .parse()
                .map_err(|_| anyhow!("Invalid COURTSIDE_RETENTION_FACTOR value: {}", retention))?;
        }
        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.paths.games_csv.as_os_str().is_empty() {
        return Err(anyhow!("Games CSV path cannot be empty"));
    }
    if config.paths.rated_csv.as_os_str().is_empty() {
        return Err(anyhow!("Rated CSV path cannot be empty"));
    }

    config.elo.validate()?;

    Ok(())
}
