//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

use chrono::NaiveDate;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating-engine scenarios
#[derive(Debug, thiserror::Error)]
pub enum CourtsideError {
    #[error("Unknown team: {team}")]
    UnknownTeam { team: String },

    #[error("Invalid score: {reason}")]
    InvalidScore { reason: String },

    #[error(
        "Out-of-order input in season {season}: game {game_id} on {date} \
         follows a game dated {previous}"
    )]
    OutOfOrderInput {
        season: i32,
        game_id: i64,
        date: NaiveDate,
        previous: NaiveDate,
    },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Games table error: {message}")]
    TableError { message: String },
}
