//! Common types used throughout the rating engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Team identity as it appears in the games table
pub type TeamName = String;

/// Year-normalized season identifier (e.g. 2024 for the 2023-24 season)
pub type Season = i32;

/// League-assigned game identifier, unique within a season
pub type GameId = i64;

/// Which side of a matchup a team occupies, also used as the winner indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

/// Whether a game has been played yet
///
/// Modeled as a sum type so the Season Processor's two code paths are
/// exhaustive instead of scattering nullable-score checks across the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Not yet played; scores are unknown
    Scheduled,
    /// Final score is on the books
    Settled { home_score: u32, away_score: u32 },
}

impl GameStatus {
    /// Winner of a settled game, `None` for scheduled games and exact ties
    /// (ties are rejected as `InvalidScore` before ratings are touched)
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameStatus::Scheduled => None,
            GameStatus::Settled {
                home_score,
                away_score,
            } => match home_score.cmp(away_score) {
                std::cmp::Ordering::Greater => Some(Side::Home),
                std::cmp::Ordering::Less => Some(Side::Away),
                std::cmp::Ordering::Equal => None,
            },
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, GameStatus::Settled { .. })
    }

    /// `(home_score, away_score)` for settled games
    pub fn scores(&self) -> Option<(u32, u32)> {
        match self {
            GameStatus::Scheduled => None,
            GameStatus::Settled {
                home_score,
                away_score,
            } => Some((*home_score, *away_score)),
        }
    }
}

/// One row of the canonical games table: a scheduled or completed matchup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub season: Season,
    pub game_id: GameId,
    pub date: NaiveDate,
    pub home_team: TeamName,
    pub away_team: TeamName,
    pub status: GameStatus,
}

/// Pre-game derived fields, attached to every processed row
///
/// Ratings here are the Rating Store values as of just before this game;
/// probabilities and spread are computed from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub home_rating: f64,
    pub away_rating: f64,
    pub home_win_prob: f64,
    pub away_win_prob: f64,
    /// Predicted scoring margin in the away-minus-home convention, matching
    /// the realized spread column
    pub point_spread: f64,
}

/// Post-game derived fields, present only for settled rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settlement {
    pub home_rating_post: f64,
    pub away_rating_post: f64,
    /// Realized margin: away score minus home score
    pub actual_spread: f64,
    pub winner: Side,
}

/// A games-table row augmented with the engine's derived fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatedGame {
    pub game: GameRecord,
    pub prediction: Prediction,
    pub settlement: Option<Settlement>,
}
