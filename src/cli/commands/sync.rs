//! Sync command implementation
//!
//! Runs one full detect+export cycle and reports the outcome.

use crate::cli::commands::build_cycle;
use crate::config::load_config;
use crate::core::export::CycleSummary;
use clap::Args;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Dry run mode - detect and render, but don't persist markers or upload
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting sync command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        let cycle = match build_cycle(&config).await {
            Ok(cycle) => cycle,
            Err(e) => {
                println!("❌ Failed to connect to the tracking database or object store");
                println!("   Error: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        let summary = cycle.run().await;
        print_summary(&summary, config.application.dry_run);

        if summary.is_success() {
            Ok(0)
        } else {
            Ok(1)
        }
    }
}

fn print_summary(summary: &CycleSummary, dry_run: bool) {
    if dry_run {
        println!("📦 Sync cycle finished (dry run - nothing was written)");
    } else {
        println!("📦 Sync cycle finished");
    }
    println!();
    println!(
        "  Customers: {} detected, {} exported",
        summary.customers_detected, summary.customers_exported
    );
    println!(
        "  Orders:    {} detected, {} exported",
        summary.orders_detected, summary.orders_exported
    );
    println!("  Objects uploaded: {}", summary.objects.len());
    for object in &summary.objects {
        println!("    {} (version {})", object.key, object.version);
    }
    println!("  Duration: {} ms", summary.duration.as_millis());

    if !summary.is_success() {
        println!();
        println!("❌ {} error(s); the next cycle will retry:", summary.errors.len());
        for error in &summary.errors {
            println!("   [{}] {}", error.phase, error.message);
        }
    }
}
