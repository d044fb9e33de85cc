//! Rating store: one Elo rating per team
//!
//! The store owns every team's current rating for the lifetime of a run.
//! Ratings are read and written only through this interface; teams are fixed
//! at construction and never added or removed afterwards.

use crate::config::EloSettings;
use crate::error::{CourtsideError, Result};
use crate::rating::outcome::OutcomeModel;
use crate::types::TeamName;
use std::collections::HashMap;

/// Per-team Elo ratings plus the update and regression rules
#[derive(Debug, Clone)]
pub struct RatingStore {
    ratings: HashMap<TeamName, f64>,
    settings: EloSettings,
    model: OutcomeModel,
}

impl RatingStore {
    /// Create a store with every known team at the baseline rating
    pub fn new(teams: impl IntoIterator<Item = TeamName>, settings: EloSettings) -> Result<Self> {
        settings.validate()?;
        let model = OutcomeModel::new(&settings);
        let ratings = teams
            .into_iter()
            .map(|team| (team, settings.baseline_rating))
            .collect();

        Ok(Self {
            ratings,
            settings,
            model,
        })
    }

    /// Current rating for a team
    pub fn rating(&self, team: &str) -> Result<f64> {
        self.ratings.get(team).copied().ok_or_else(|| {
            CourtsideError::UnknownTeam {
                team: team.to_string(),
            }
            .into()
        })
    }

    /// Number of teams known to the store
    pub fn team_count(&self) -> usize {
        self.ratings.len()
    }

    /// The outcome model configured for this store
    pub fn model(&self) -> &OutcomeModel {
        &self.model
    }

    /// Probability that the home side wins, home-court bonus included
    pub fn home_win_probability(&self, home_team: &str, away_team: &str) -> Result<f64> {
        let home = self.rating(home_team)?;
        let away = self.rating(away_team)?;
        Ok(self
            .model
            .win_probability(home, away, self.settings.home_advantage))
    }

    /// Predicted scoring margin in the away-minus-home convention, so the
    /// value is directly comparable to the realized spread column
    pub fn predicted_spread(&self, home_team: &str, away_team: &str) -> Result<f64> {
        let home = self.rating(home_team)?;
        let away = self.rating(away_team)?;
        Ok(self
            .model
            .point_spread(away, home, -self.settings.home_advantage))
    }

    /// Apply one Elo update to both teams' ratings in place
    ///
    /// Expected scores use the pre-update ratings; the home side's expectation
    /// includes the home-court bonus and the away side's is its complement.
    /// Tied scores are rejected before either rating is touched: the league
    /// always resolves a winner, so a tie is corrupt input.
    pub fn update(
        &mut self,
        home_team: &str,
        home_score: u32,
        away_team: &str,
        away_score: u32,
    ) -> Result<()> {
        if home_score == away_score {
            return Err(CourtsideError::InvalidScore {
                reason: format!(
                    "tied score {home_score}-{away_score} between {home_team} and {away_team}"
                ),
            }
            .into());
        }

        let home = self.rating(home_team)?;
        let away = self.rating(away_team)?;

        let home_expected = self
            .model
            .win_probability(home, away, self.settings.home_advantage);
        let away_expected = 1.0 - home_expected;

        let (home_actual, away_actual) = if home_score > away_score {
            (1.0, 0.0)
        } else {
            (0.0, 1.0)
        };

        let k = self.settings.k_factor;
        self.ratings
            .insert(home_team.to_string(), home + k * (home_actual - home_expected));
        self.ratings
            .insert(away_team.to_string(), away + k * (away_actual - away_expected));

        Ok(())
    }

    /// Move every rating a fixed fraction toward the baseline
    ///
    /// Applied once between consecutive seasons, never mid-season.
    pub fn regress_to_mean(&mut self) {
        let baseline = self.settings.baseline_rating;
        let retention = self.settings.retention_factor;
        for rating in self.ratings.values_mut() {
            *rating = baseline + (*rating - baseline) * retention;
        }
    }
}
