// Fracht - Customer & Order CSV Export Tool
// Copyright (c) 2025 Fracht Contributors
// Licensed under the MIT License

//! # Fracht - Change-Detection CSV Export
//!
//! Fracht periodically detects which customer and order rows changed since
//! they were last exported and publishes the changed rows, grouped by
//! country, as CSV files to S3-compatible object storage. A local marker
//! table records what has already been exported so unchanged rows are
//! skipped on subsequent runs.
//!
//! ## Overview
//!
//! One sync cycle:
//! - **Detects** changed rows by comparing content fingerprints against
//!   persisted sync markers (full scan, SHA-256 over canonicalized fields)
//! - **Groups** the unsynced rows by partition key (country)
//! - **Persists** fresh markers inside one local transaction
//! - **Uploads** one CSV object per partition and hour, committing the
//!   local transaction only after every upload succeeded, and deleting
//!   uploaded objects again if the local side fails
//!
//! ## Architecture
//!
//! Fracht follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (fingerprint, detect, render, export)
//! - [`adapters`] - External integrations (PostgreSQL, S3) behind ports
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fracht::config::FrachtConfig;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = FrachtConfig::from_file("fracht.toml")?;
//!     println!("Exporting to bucket {}", config.s3.bucket);
//!     Ok(())
//! }
//! ```
//!
//! The cycle entry point is [`core::export::SyncCycle::run`]; it is wired
//! from configuration by the `sync` and `run` commands. Callers must not
//! start a new cycle while a previous one is still running; the `run`
//! command guarantees this by awaiting each cycle.
//!
//! ## Error Handling
//!
//! Fracht uses the [`domain::FrachtError`] type for all errors:
//!
//! ```rust,no_run
//! use fracht::domain::FrachtError;
//!
//! fn example() -> Result<(), FrachtError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = fracht::config::load_config("fracht.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Fracht uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting sync cycle");
//! warn!(key = "kunde_DE_20250101_09.csv", "Cleanup failed for uploaded object");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
