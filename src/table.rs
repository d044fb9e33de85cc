//! CSV boundary for the canonical and augmented games tables
//!
//! The canonical table is one row per matchup with nullable score columns.
//! The augmented table written after a run carries the same input columns
//! plus the engine's derived fields, so it can be fed back in as input:
//! unknown columns are ignored on read.

use crate::error::{CourtsideError, Result};
use crate::types::{GameRecord, GameStatus, RatedGame, Side};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canonical games-table row as it appears on disk
#[derive(Debug, Deserialize)]
struct RawGameRow {
    season: i32,
    game_id: i64,
    game_date: NaiveDate,
    home_team: String,
    away_team: String,
    home_score: Option<i64>,
    away_score: Option<i64>,
}

/// Augmented games-table row written after a run
#[derive(Debug, Serialize)]
struct RatedGameRow {
    season: i32,
    game_id: i64,
    game_date: NaiveDate,
    home_team: String,
    away_team: String,
    home_score: Option<u32>,
    away_score: Option<u32>,
    home_elo: f64,
    away_elo: f64,
    home_elo_post: Option<f64>,
    away_elo_post: Option<f64>,
    home_win_prob: f64,
    away_win_prob: f64,
    point_spread: f64,
    actual_spread: Option<f64>,
    winner: Option<Side>,
}

impl RawGameRow {
    fn into_record(self) -> Result<GameRecord> {
        let status = match (self.home_score, self.away_score) {
            (None, None) => GameStatus::Scheduled,
            (Some(home), Some(away)) => {
                if home < 0 || away < 0 {
                    return Err(CourtsideError::InvalidScore {
                        reason: format!("game {}: negative score {home}-{away}", self.game_id),
                    }
                    .into());
                }
                GameStatus::Settled {
                    home_score: home as u32,
                    away_score: away as u32,
                }
            }
            _ => {
                return Err(CourtsideError::InvalidScore {
                    reason: format!(
                        "game {}: one score present without the other",
                        self.game_id
                    ),
                }
                .into());
            }
        };

        Ok(GameRecord {
            season: self.season,
            game_id: self.game_id,
            date: self.game_date,
            home_team: self.home_team,
            away_team: self.away_team,
            status,
        })
    }
}

/// Read the canonical games table from a CSV file
pub fn read_games(path: &Path) -> Result<Vec<GameRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open games table {}", path.display()))?;

    let mut games = Vec::new();
    for (line, row) in reader.deserialize().enumerate() {
        let raw: RawGameRow = row.map_err(|e| CourtsideError::TableError {
            message: format!("{} row {}: {}", path.display(), line + 2, e),
        })?;
        games.push(raw.into_record()?);
    }
    Ok(games)
}

/// Write the augmented games table to a CSV file
pub fn write_rated_games(path: &Path, games: &[RatedGame]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create rated table {}", path.display()))?;

    for rated in games {
        let (home_score, away_score) = match rated.game.status {
            GameStatus::Scheduled => (None, None),
            GameStatus::Settled {
                home_score,
                away_score,
            } => (Some(home_score), Some(away_score)),
        };

        writer
            .serialize(RatedGameRow {
                season: rated.game.season,
                game_id: rated.game.game_id,
                game_date: rated.game.date,
                home_team: rated.game.home_team.clone(),
                away_team: rated.game.away_team.clone(),
                home_score,
                away_score,
                home_elo: rated.prediction.home_rating,
                away_elo: rated.prediction.away_rating,
                home_elo_post: rated.settlement.as_ref().map(|s| s.home_rating_post),
                away_elo_post: rated.settlement.as_ref().map(|s| s.away_rating_post),
                home_win_prob: rated.prediction.home_win_prob,
                away_win_prob: rated.prediction.away_win_prob,
                point_spread: rated.prediction.point_spread,
                actual_spread: rated.settlement.as_ref().map(|s| s.actual_spread),
                winner: rated.settlement.as_ref().map(|s| s.winner),
            })
            .map_err(|e| CourtsideError::TableError {
                message: format!("{}: {}", path.display(), e),
            })?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush rated table {}", path.display()))?;
    Ok(())
}
