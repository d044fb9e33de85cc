//! The rating core: Elo store, outcome model and season processor
//!
//! This module owns all nontrivial state and numeric policy in the crate;
//! everything outside it is table I/O and report formatting.

pub mod engine;
pub mod outcome;
pub mod store;

// Re-export commonly used types
pub use engine::{current_season, prediction_error, SeasonProcessor};
pub use outcome::OutcomeModel;
pub use store::RatingStore;
