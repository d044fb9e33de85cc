//! Season processor: folds the games table through the rating store
//!
//! Seasons run in ascending order and games within a season run in
//! chronological order, because every update depends on the ratings left by
//! the previous game. Scheduled rows are predicted without touching the
//! store; settled rows are predicted from pre-update ratings and then
//! applied. Ratings regress toward the baseline between seasons, never after
//! the final one.

use crate::config::EloSettings;
use crate::error::{CourtsideError, Result};
use crate::rating::store::RatingStore;
use crate::types::{
    GameRecord, GameStatus, Prediction, RatedGame, Season, Settlement, TeamName,
};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

/// Sequential rating-engine run over a games table
#[derive(Debug)]
pub struct SeasonProcessor {
    store: RatingStore,
}

impl SeasonProcessor {
    /// Create a processor around an existing rating store
    pub fn new(store: RatingStore) -> Self {
        Self { store }
    }

    /// Create a processor whose team set is every team appearing in the table
    pub fn from_games(games: &[GameRecord], settings: EloSettings) -> Result<Self> {
        let teams: HashSet<TeamName> = games
            .iter()
            .flat_map(|g| [g.home_team.clone(), g.away_team.clone()])
            .collect();
        let store = RatingStore::new(teams, settings)?;
        Ok(Self::new(store))
    }

    /// Process the whole table and return one augmented row per input row,
    /// in season-then-chronological order, plus the final store state
    ///
    /// Any record-level failure aborts the run: once a season's ratings are
    /// partially updated, continuing would produce inconsistent history, and
    /// every failure here is a deterministic function of the input.
    pub fn process(mut self, games: Vec<GameRecord>) -> Result<(Vec<RatedGame>, RatingStore)> {
        validate_input_order(&games)?;

        let mut seasons: BTreeMap<Season, Vec<GameRecord>> = BTreeMap::new();
        for game in games {
            seasons.entry(game.season).or_default().push(game);
        }
        let final_season = seasons.keys().next_back().copied();

        let mut rated = Vec::new();
        for (season, mut season_games) in seasons {
            info!(season, games = season_games.len(), "Processing season");
            season_games.sort_by(|a, b| (a.date, a.game_id).cmp(&(b.date, b.game_id)));

            for game in season_games {
                rated.push(self.process_game(game)?);
            }

            if Some(season) != final_season {
                info!(season, "Regressing ratings toward the mean");
                self.store.regress_to_mean();
            }
        }

        Ok((rated, self.store))
    }

    fn process_game(&mut self, game: GameRecord) -> Result<RatedGame> {
        let home_rating = self.store.rating(&game.home_team)?;
        let away_rating = self.store.rating(&game.away_team)?;
        let home_win_prob = self
            .store
            .home_win_probability(&game.home_team, &game.away_team)?;
        let prediction = Prediction {
            home_rating,
            away_rating,
            home_win_prob,
            away_win_prob: 1.0 - home_win_prob,
            point_spread: self
                .store
                .predicted_spread(&game.home_team, &game.away_team)?,
        };

        let settlement = match game.status {
            GameStatus::Scheduled => {
                debug!(game_id = game.game_id, "Predicted scheduled game");
                None
            }
            GameStatus::Settled {
                home_score,
                away_score,
            } => {
                let winner = game.status.winner().ok_or_else(|| {
                    CourtsideError::InvalidScore {
                        reason: format!(
                            "game {}: tied score {home_score}-{away_score}",
                            game.game_id
                        ),
                    }
                })?;

                self.store
                    .update(&game.home_team, home_score, &game.away_team, away_score)?;

                Some(Settlement {
                    home_rating_post: self.store.rating(&game.home_team)?,
                    away_rating_post: self.store.rating(&game.away_team)?,
                    actual_spread: away_score as f64 - home_score as f64,
                    winner,
                })
            }
        };

        Ok(RatedGame {
            game,
            prediction,
            settlement,
        })
    }
}

/// Reject tables whose rows arrive out of chronological order within a season
///
/// The upstream merge stage is contractually date-sorted; a violation means
/// the table is corrupt, and silently reordering it would hide that.
fn validate_input_order(games: &[GameRecord]) -> Result<()> {
    let mut last_seen: HashMap<Season, NaiveDate> = HashMap::new();
    for game in games {
        if let Some(&previous) = last_seen.get(&game.season) {
            if game.date < previous {
                return Err(CourtsideError::OutOfOrderInput {
                    season: game.season,
                    game_id: game.game_id,
                    date: game.date,
                    previous,
                }
                .into());
            }
        }
        last_seen.insert(game.season, game.date);
    }
    Ok(())
}

/// The "current" season for reporting: the maximum identifier present
pub fn current_season(games: &[GameRecord]) -> Option<Season> {
    games.iter().map(|g| g.season).max()
}

/// Sum of absolute differences between predicted and realized point spread
/// over one season's settled games
pub fn prediction_error(games: &[RatedGame], season: Season) -> f64 {
    games
        .iter()
        .filter(|g| g.game.season == season)
        .filter_map(|g| {
            g.settlement
                .as_ref()
                .map(|s| (s.actual_spread - g.prediction.point_spread).abs())
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn settled(season: Season, id: i64, d: u32, home: &str, away: &str, hs: u32, aspts: u32) -> GameRecord {
        GameRecord {
            season,
            game_id: id,
            date: day(d),
            home_team: home.to_string(),
            away_team: away.to_string(),
            status: GameStatus::Settled {
                home_score: hs,
                away_score: aspts,
            },
        }
    }

    fn scheduled(season: Season, id: i64, d: u32, home: &str, away: &str) -> GameRecord {
        GameRecord {
            season,
            game_id: id,
            date: day(d),
            home_team: home.to_string(),
            away_team: away.to_string(),
            status: GameStatus::Scheduled,
        }
    }

    fn neutral_settings(k: f64) -> EloSettings {
        EloSettings {
            k_factor: k,
            home_advantage: 0.0,
            ..EloSettings::default()
        }
    }

    #[test]
    fn test_worked_example_settlement_then_prediction() {
        // Three 1500 teams, K=20, no home bonus: A beats B 110-100, then
        // C hosts A unplayed.
        let games = vec![
            settled(1, 1, 1, "A", "B", 110, 100),
            scheduled(1, 2, 2, "C", "A"),
        ];
        let processor = SeasonProcessor::from_games(&games, neutral_settings(20.0)).unwrap();
        let (rated, store) = processor.process(games).unwrap();

        let first = &rated[0];
        assert_relative_eq!(first.prediction.home_rating, 1500.0);
        assert_relative_eq!(first.prediction.home_win_prob, 0.5);
        let settlement = first.settlement.as_ref().unwrap();
        assert_relative_eq!(settlement.home_rating_post, 1510.0);
        assert_relative_eq!(settlement.away_rating_post, 1490.0);
        assert_relative_eq!(settlement.actual_spread, -10.0);

        let second = &rated[1];
        assert!(second.settlement.is_none());
        assert_relative_eq!(second.prediction.home_rating, 1500.0);
        assert_relative_eq!(second.prediction.away_rating, 1510.0);
        assert_relative_eq!(second.prediction.home_win_prob, 0.4856, epsilon = 1e-4);
        assert_relative_eq!(
            second.prediction.home_win_prob + second.prediction.away_win_prob,
            1.0
        );

        // Prediction mode must not have moved any rating
        assert_relative_eq!(store.rating("C").unwrap(), 1500.0);
        assert_relative_eq!(store.rating("A").unwrap(), 1510.0);
    }

    #[test]
    fn test_regression_applied_between_seasons_but_not_after_final() {
        let games = vec![
            settled(2023, 1, 1, "A", "B", 110, 100),
            settled(2024, 2, 1, "A", "B", 100, 110),
        ];
        let settings = EloSettings {
            retention_factor: 0.75,
            ..neutral_settings(20.0)
        };
        let processor = SeasonProcessor::from_games(&games, settings).unwrap();
        let (rated, _) = processor.process(games).unwrap();

        // Season 2023 leaves A at 1510; 2024 opens from the regressed 1507.5
        assert_relative_eq!(rated[1].prediction.home_rating, 1507.5);

        // The final season is never regressed: post ratings carry verbatim
        let post = rated[1].settlement.as_ref().unwrap();
        assert!(post.home_rating_post < 1507.5);
    }

    #[test]
    fn test_settlement_order_is_chronological_with_game_id_tiebreak() {
        // Two games on the same date arrive reversed by id; the lower id
        // must settle first.
        let games = vec![
            settled(1, 5, 1, "A", "B", 100, 90),
            settled(1, 4, 1, "C", "D", 100, 90),
        ];
        let processor = SeasonProcessor::from_games(&games, neutral_settings(20.0)).unwrap();
        let (rated, _) = processor.process(games).unwrap();
        assert_eq!(rated[0].game.game_id, 4);
        assert_eq!(rated[1].game.game_id, 5);
    }

    #[test]
    fn test_out_of_order_input_rejected() {
        let games = vec![
            settled(1, 1, 5, "A", "B", 100, 90),
            settled(1, 2, 3, "C", "D", 100, 90),
        ];
        let processor = SeasonProcessor::from_games(&games, neutral_settings(20.0)).unwrap();
        let err = processor.process(games).unwrap_err();
        assert!(err.to_string().contains("Out-of-order"));
    }

    #[test]
    fn test_interleaved_seasons_keep_independent_order() {
        // Rows of different seasons may interleave; order is only checked
        // within a season.
        let games = vec![
            settled(2023, 1, 10, "A", "B", 100, 90),
            settled(2024, 9, 1, "A", "B", 100, 90),
            settled(2023, 2, 11, "A", "B", 100, 90),
        ];
        let processor = SeasonProcessor::from_games(&games, neutral_settings(20.0)).unwrap();
        assert!(processor.process(games).is_ok());
    }

    #[test]
    fn test_tied_score_is_invalid() {
        let games = vec![settled(1, 7, 1, "A", "B", 100, 100)];
        let processor = SeasonProcessor::from_games(&games, neutral_settings(20.0)).unwrap();
        let err = processor.process(games).unwrap_err();
        assert!(err.to_string().contains("tied score"));
    }

    #[test]
    fn test_unknown_team_fails_fast() {
        let known = vec![settled(1, 1, 1, "A", "B", 100, 90)];
        let processor = SeasonProcessor::from_games(&known, neutral_settings(20.0)).unwrap();
        let stranger = vec![settled(1, 1, 1, "A", "Z", 100, 90)];
        assert!(processor.process(stranger).is_err());
    }

    #[test]
    fn test_empty_table_yields_empty_output() {
        let processor = SeasonProcessor::from_games(&[], EloSettings::default()).unwrap();
        let (rated, store) = processor.process(Vec::new()).unwrap();
        assert!(rated.is_empty());
        assert_eq!(store.team_count(), 0);
    }

    #[test]
    fn test_current_season_is_the_maximum() {
        let games = vec![
            scheduled(2023, 1, 1, "A", "B"),
            scheduled(2025, 2, 1, "A", "B"),
            scheduled(2024, 3, 1, "A", "B"),
        ];
        assert_eq!(current_season(&games), Some(2025));
        assert_eq!(current_season(&[]), None);
    }

    #[test]
    fn test_prediction_error_sums_settled_rows_only() {
        let games = vec![
            settled(1, 1, 1, "A", "B", 100, 90),
            scheduled(1, 2, 2, "B", "A"),
        ];
        let processor = SeasonProcessor::from_games(&games, neutral_settings(20.0)).unwrap();
        let (rated, _) = processor.process(games).unwrap();

        let expected = (rated[0].settlement.as_ref().unwrap().actual_spread
            - rated[0].prediction.point_spread)
            .abs();
        assert_relative_eq!(prediction_error(&rated, 1), expected);
        assert_relative_eq!(prediction_error(&rated, 2), 0.0);
    }
}
