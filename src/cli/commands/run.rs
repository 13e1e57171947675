//! Run command implementation
//!
//! Periodic trigger for the sync cycle: waits the configured initial
//! delay, then starts one cycle per interval. Each cycle is awaited to
//! completion before the next tick is polled, so cycles never overlap.
//! Shutdown signals stop the loop after the current cycle finishes.

use crate::cli::commands::build_cycle;
use crate::config::load_config;
use clap::Args;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the cycle interval in seconds
    #[arg(long)]
    pub interval_seconds: Option<u64>,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting periodic sync");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if let Some(interval) = self.interval_seconds {
            tracing::info!(interval_seconds = interval, "Overriding cycle interval from CLI");
            config.scheduler.interval_seconds = interval;
        }
        if config.scheduler.interval_seconds == 0 {
            println!("❌ Cycle interval must be greater than 0");
            return Ok(2);
        }

        let cycle = match build_cycle(&config).await {
            Ok(cycle) => cycle,
            Err(e) => {
                println!("❌ Failed to connect to the tracking database or object store");
                println!("   Error: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        let initial_delay = Duration::from_secs(config.scheduler.initial_delay_seconds);
        if !initial_delay.is_zero() {
            tracing::info!(
                delay_seconds = config.scheduler.initial_delay_seconds,
                "Waiting before first cycle"
            );
            tokio::select! {
                _ = tokio::time::sleep(initial_delay) => {}
                _ = shutdown_signal.changed() => {
                    tracing::info!("Shutdown requested during initial delay");
                    return Ok(0);
                }
            }
        }

        tracing::info!(
            interval_seconds = config.scheduler.interval_seconds,
            "Entering sync loop"
        );
        let mut interval =
            tokio::time::interval(Duration::from_secs(config.scheduler.interval_seconds));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    // The cycle is awaited here; the next tick cannot start
                    // a second cycle while this one is still running.
                    let summary = cycle.run().await;
                    if !summary.is_success() {
                        tracing::warn!(
                            errors = summary.errors.len(),
                            "Cycle finished with errors; the next cycle will retry"
                        );
                    }
                }
                _ = shutdown_signal.changed() => {
                    tracing::info!("Shutdown requested; stopping periodic sync");
                    break;
                }
            }
        }

        Ok(0)
    }
}
