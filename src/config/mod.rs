//! Configuration management for the courtside pipeline
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, and default values for the rating engine.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, PathSettings, ServiceSettings};
pub use rating::EloSettings;
