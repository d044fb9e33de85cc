//! Markdown rendering of the season table and the latest standings
//!
//! Pipe-table output in the shape the repository publishes: the current
//! season's games most recent first, and one row per team sorted by rating.

use crate::error::Result;
use crate::standings::Standing;
use crate::types::{RatedGame, Season};
use anyhow::Context;
use chrono::Utc;
use std::path::Path;

/// Render the season's games as a Markdown table, most recent first
pub fn season_report(games: &[RatedGame], season: Season) -> String {
    let mut rows: Vec<&RatedGame> = games.iter().filter(|g| g.game.season == season).collect();
    rows.sort_by(|a, b| (b.game.date, b.game.game_id).cmp(&(a.game.date, a.game.game_id)));

    let mut out = String::new();
    out.push_str(&format!("## NBA Elo - {season} Season\n\n"));
    out.push_str(&format!("*Updated {}*\n\n", Utc::now().format("%c")));
    out.push_str(
        "| date | away_team | away_elo | away_win_prob | away_score \
         | home_team | home_elo | home_win_prob | home_score \
         | point_spread | actual_spread | winner |\n",
    );
    out.push_str("|---|---|---|---|---|---|---|---|---|---|---|---|\n");

    for rated in rows {
        let (home_score, away_score) = match rated.game.status.scores() {
            Some((home, away)) => (home.to_string(), away.to_string()),
            None => (String::new(), String::new()),
        };
        let (actual_spread, winner) = match &rated.settlement {
            Some(s) => (format!("{:.0}", s.actual_spread), s.winner.to_string()),
            None => (String::new(), String::new()),
        };

        out.push_str(&format!(
            "| {} | {} | {:.0} | {:.0}% | {} | {} | {:.0} | {:.0}% | {} | {:.0} | {} | {} |\n",
            rated.game.date,
            rated.game.away_team,
            rated.prediction.away_rating,
            rated.prediction.away_win_prob * 100.0,
            away_score,
            rated.game.home_team,
            rated.prediction.home_rating,
            rated.prediction.home_win_prob * 100.0,
            home_score,
            rated.prediction.point_spread,
            actual_spread,
            winner,
        ));
    }

    out
}

/// Render the latest standings as a Markdown table
pub fn standings_report(standings: &[Standing]) -> String {
    let mut out = String::new();
    out.push_str("## NBA Latest Team Elo\n\n");
    out.push_str(&format!("*Updated {}*\n\n", Utc::now().format("%c")));
    out.push_str("| team | elo | wins | losses | last_played | location | streak |\n");
    out.push_str("|---|---|---|---|---|---|---|\n");

    for standing in standings {
        out.push_str(&format!(
            "| {} | {:.0} | {} | {} | {} | {} | {} |\n",
            standing.team,
            standing.rating,
            standing.wins,
            standing.losses,
            standing.last_played,
            standing.location,
            standing.streak,
        ));
    }

    out
}

/// Write a rendered report to disk
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write report {}", path.display()))
}
