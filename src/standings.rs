//! Standings aggregator: per-team season snapshots from the rated table
//!
//! Each settled game is exploded into a home and an away perspective row.
//! Running wins, losses and streak are computed per team in date order, and
//! a team's Standing is its most recent perspective. Standings are fully
//! recomputed on every request; they carry no state of their own.

use crate::types::{GameId, RatedGame, Season, Side, TeamName};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Signed run-length of consecutive wins (positive) or losses (negative)
/// ending at a team's most recent game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak(pub i32);

impl std::fmt::Display for Streak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 >= 0 {
            write!(f, "W{}", self.0)
        } else {
            write!(f, "L{}", -self.0)
        }
    }
}

/// One team's derived snapshot for a season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standing {
    pub team: TeamName,
    /// Rating as of the team's most recent settled game
    pub rating: f64,
    pub wins: u32,
    pub losses: u32,
    pub streak: Streak,
    pub last_played: NaiveDate,
    /// Whether the most recent game was at home or away
    pub location: Side,
}

/// A team's view of one settled game
struct Perspective {
    date: NaiveDate,
    game_id: GameId,
    rating_post: f64,
    won: bool,
    location: Side,
}

/// One Standing per team that played at least one settled game in `season`,
/// sorted by rating descending (team name breaks exact rating ties)
///
/// Games sharing a team's most recent date are ordered by game identifier,
/// higher id last, so the snapshot is deterministic.
pub fn standings_for_season(games: &[RatedGame], season: Season) -> Vec<Standing> {
    let mut by_team: HashMap<&str, Vec<Perspective>> = HashMap::new();

    for rated in games.iter().filter(|g| g.game.season == season) {
        let Some(settlement) = rated.settlement.as_ref() else {
            continue;
        };

        by_team
            .entry(rated.game.home_team.as_str())
            .or_default()
            .push(Perspective {
                date: rated.game.date,
                game_id: rated.game.game_id,
                rating_post: settlement.home_rating_post,
                won: settlement.winner == Side::Home,
                location: Side::Home,
            });
        by_team
            .entry(rated.game.away_team.as_str())
            .or_default()
            .push(Perspective {
                date: rated.game.date,
                game_id: rated.game.game_id,
                rating_post: settlement.away_rating_post,
                won: settlement.winner == Side::Away,
                location: Side::Away,
            });
    }

    let mut standings: Vec<Standing> = by_team
        .into_iter()
        .map(|(team, mut rows)| {
            rows.sort_by(|a, b| (a.date, a.game_id).cmp(&(b.date, b.game_id)));

            let mut wins = 0u32;
            let mut losses = 0u32;
            let mut streak = 0i32;
            for row in &rows {
                if row.won {
                    wins += 1;
                    streak = if streak > 0 { streak + 1 } else { 1 };
                } else {
                    losses += 1;
                    streak = if streak < 0 { streak - 1 } else { -1 };
                }
            }

            let latest = rows.last().expect("team has at least one perspective row");
            Standing {
                team: team.to_string(),
                rating: latest.rating_post,
                wins,
                losses,
                streak: Streak(streak),
                last_played: latest.date,
                location: latest.location,
            }
        })
        .collect();

    standings.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.team.cmp(&b.team))
    });

    standings
}
