//! Courtside - NBA Elo rating engine
//!
//! This crate ingests a season-partitioned games table, maintains a running
//! Elo rating per team, predicts unplayed games, and derives standings and
//! Markdown reports from the augmented results.

pub mod config;
pub mod error;
pub mod rating;
pub mod report;
pub mod standings;
pub mod table;
pub mod types;

// Re-export commonly used types and traits
pub use error::{CourtsideError, Result};
pub use types::*;

// Re-export key components
pub use rating::{RatingStore, SeasonProcessor};
pub use standings::{standings_for_season, Standing};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
