//! Configuration management for fracht.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation, with `${VAR}` environment substitution and `FRACHT_*`
//! environment overrides.

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, DatabaseConfig, FrachtConfig, LoggingConfig, S3Config, SchedulerConfig,
};
