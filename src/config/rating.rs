//! Elo engine configuration
//!
//! All numeric policy lives here as an explicit value passed at engine
//! construction, so independent engine instances (e.g. parameter sweeps) can
//! coexist without hidden process-wide state.

use serde::{Deserialize, Serialize};

/// Fixed constants consumed by the rating core
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EloSettings {
    /// K-factor: how much one game's outcome shifts a rating
    pub k_factor: f64,
    /// Home-court advantage in rating points, added to the home side before
    /// computing win probability and spread
    pub home_advantage: f64,
    /// Rating every team starts at, and the mean-regression target
    pub baseline_rating: f64,
    /// Fraction of a rating's distance from baseline kept across a season
    /// boundary, in (0, 1)
    pub retention_factor: f64,
    /// Logistic scale for the win-probability curve (classical Elo uses 400)
    pub scale: f64,
    /// Rating points per point of scoring margin, for the spread estimate
    pub points_per_rating: f64,
}

impl Default for EloSettings {
    fn default() -> Self {
        Self {
            k_factor: 12.0,
            home_advantage: 100.0,
            baseline_rating: 1500.0,
            retention_factor: 0.75,
            scale: 400.0,
            points_per_rating: 28.0,
        }
    }
}

impl EloSettings {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.k_factor <= 0.0 {
            return Err(crate::error::CourtsideError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        if !(self.retention_factor > 0.0 && self.retention_factor < 1.0) {
            return Err(crate::error::CourtsideError::ConfigurationError {
                message: format!(
                    "Retention factor must be in (0, 1), got {}",
                    self.retention_factor
                ),
            }
            .into());
        }

        if self.scale <= 0.0 {
            return Err(crate::error::CourtsideError::ConfigurationError {
                message: "Rating scale must be positive".to_string(),
            }
            .into());
        }

        if self.points_per_rating <= 0.0 {
            return Err(crate::error::CourtsideError::ConfigurationError {
                message: "Points-per-rating must be positive".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
