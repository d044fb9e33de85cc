//! Main entry point for the courtside rating pipeline
//!
//! Reads the canonical games table, runs the Elo engine across all seasons,
//! and writes the augmented table plus the Markdown reports.

use anyhow::Result;
use clap::Parser;
use courtside::config::AppConfig;
use courtside::rating::{current_season, prediction_error, SeasonProcessor};
use courtside::standings::standings_for_season;
use courtside::{report, table};
use std::path::PathBuf;
use tracing::{info, warn};

/// Courtside - NBA Elo ratings, predictions and standings from a games table
#[derive(Parser)]
#[command(
    name = "courtside",
    version,
    about = "NBA Elo rating engine with game predictions and season standings",
    long_about = "Courtside reads a season-partitioned games table (CSV), maintains a running \
                 Elo rating per team with home-court advantage and between-season mean \
                 regression, predicts unplayed games, and writes the augmented table plus \
                 Markdown reports for the current season and the latest standings."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Games table override
    #[arg(long, value_name = "FILE", help = "Override input games CSV path")]
    games: Option<PathBuf>,

    /// Rated table override
    #[arg(long, value_name = "FILE", help = "Override output rated CSV path")]
    out: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// K-factor override
    #[arg(long, value_name = "K", help = "Override the Elo K-factor")]
    k_factor: Option<f64>,

    /// Home advantage override
    #[arg(
        long,
        value_name = "POINTS",
        help = "Override the home-court advantage in rating points"
    )]
    home_advantage: Option<f64>,

    /// Skip Markdown reports
    #[arg(long, help = "Write only the rated CSV, no Markdown reports")]
    no_reports: bool,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration and exit without processing games"
    )]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(games) = args.games {
        config.paths.games_csv = games;
    }
    if let Some(out) = args.out {
        config.paths.rated_csv = out;
    }
    if let Some(log_level) = args.log_level {
        config.service.log_level = log_level;
    }
    if let Some(k_factor) = args.k_factor {
        config.elo.k_factor = k_factor;
    }
    if let Some(home_advantage) = args.home_advantage {
        config.elo.home_advantage = home_advantage;
    }
    courtside::config::validate_config(&config)?;

    init_logging(&config.service.log_level)?;

    if args.dry_run {
        info!("Configuration valid, exiting (dry run)");
        return Ok(());
    }

    info!(
        path = %config.paths.games_csv.display(),
        "Reading games table"
    );
    let games = table::read_games(&config.paths.games_csv)?;
    info!(games = games.len(), "Loaded games table");

    let Some(season) = current_season(&games) else {
        warn!("Games table is empty, nothing to do");
        return Ok(());
    };

    let processor = SeasonProcessor::from_games(&games, config.elo.clone())?;
    let (rated, _store) = processor.process(games)?;

    info!(
        path = %config.paths.rated_csv.display(),
        "Writing rated games table"
    );
    table::write_rated_games(&config.paths.rated_csv, &rated)?;

    if !args.no_reports {
        info!(
            path = %config.paths.season_report_md.display(),
            "Writing season report"
        );
        report::write_report(
            &config.paths.season_report_md,
            &report::season_report(&rated, season),
        )?;

        let standings = standings_for_season(&rated, season);
        info!(
            path = %config.paths.standings_md.display(),
            teams = standings.len(),
            "Writing standings report"
        );
        report::write_report(
            &config.paths.standings_md,
            &report::standings_report(&standings),
        )?;
    }

    let abs_error = prediction_error(&rated, season);
    info!(
        season,
        k_factor = config.elo.k_factor,
        home_advantage = config.elo.home_advantage,
        abs_error,
        "Run complete"
    );

    Ok(())
}
