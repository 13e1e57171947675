//! Status command implementation
//!
//! Displays the sync marker inventory of both entity types.

use crate::adapters::postgres::{PgCustomerMarkerStore, PgOrderMarkerStore, PostgresClient};
use crate::adapters::store::MarkerStore;
use crate::config::load_config;
use clap::Args;
use std::sync::Arc;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print markers as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking sync marker status");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let client = match PostgresClient::new(&config.database) {
            Ok(c) => Arc::new(c),
            Err(e) => {
                println!("❌ Failed to configure the tracking database");
                println!("   Error: {e}");
                return Ok(2);
            }
        };
        if let Err(e) = client.test_connection().await {
            println!("❌ Failed to connect to the tracking database");
            println!("   Error: {e}");
            return Ok(4); // Connection error exit code
        }

        let customer_markers = PgCustomerMarkerStore::new(client.clone());
        let order_markers = PgOrderMarkerStore::new(client);

        let customers = match customer_markers.find_all().await {
            Ok(m) => m,
            Err(e) => {
                println!("❌ Failed to load customer markers");
                println!("   Error: {e}");
                return Ok(5); // Fatal error exit code
            }
        };
        let orders = match order_markers.find_all().await {
            Ok(m) => m,
            Err(e) => {
                println!("❌ Failed to load order markers");
                println!("   Error: {e}");
                return Ok(5);
            }
        };

        if self.json {
            let value = serde_json::json!({
                "customers": customers,
                "orders": orders,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(0);
        }

        println!("📊 Sync marker status");
        println!();

        if customers.is_empty() && orders.is_empty() {
            println!("No sync markers found.");
            println!("Run 'fracht sync' to export data.");
            return Ok(0);
        }

        println!(
            "{:<10} {:<40} {:<66} {:<25}",
            "Type", "Entity", "Fingerprint", "Last Synced"
        );
        println!("{}", "-".repeat(141));
        for marker in &customers {
            println!(
                "{:<10} {:<40} {:<66} {:<25}",
                "customer",
                marker.entity_id.to_string(),
                marker.fingerprint.as_str(),
                marker.last_synced_at.to_rfc3339()
            );
        }
        for marker in &orders {
            println!(
                "{:<10} {:<40} {:<66} {:<25}",
                "order",
                marker.entity_id.to_string(),
                marker.fingerprint.as_str(),
                marker.last_synced_at.to_rfc3339()
            );
        }
        println!();
        println!(
            "{} customer marker(s), {} order marker(s)",
            customers.len(),
            orders.len()
        );

        Ok(0)
    }
}
