//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for fracht using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Fracht - customer & order CSV export to S3
#[derive(Parser, Debug)]
#[command(name = "fracht")]
#[command(version, about, long_about = None)]
#[command(author = "Fracht Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "fracht.toml", env = "FRACHT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FRACHT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one detect+export cycle for customers and orders
    Sync(commands::sync::SyncArgs),

    /// Run cycles periodically on the configured interval
    Run(commands::run::RunArgs),

    /// Show the sync marker inventory
    Status(commands::status::StatusArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
