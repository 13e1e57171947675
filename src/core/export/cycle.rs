//! Sync cycle entry point
//!
//! One cycle runs detect → export for customers, then detect → export for
//! orders, strictly sequentially. A failure in one half is recorded in the
//! summary and does not prevent the other half from running; unresolved
//! entities stay unsynced and the next cycle retries them naturally.
//!
//! The entry point takes no parameters and is re-entrant-safe by contract
//! only: callers must not start a new cycle while a previous one is still
//! running. The `run` command guarantees this by awaiting each cycle.

use crate::adapters::store::{CustomerRepository, MarkerStore, ObjectStore, OrderRepository};
use crate::core::detect::ChangeDetector;
use crate::core::export::coordinator::{CustomerExport, ExportCoordinator, OrderExport};
use crate::core::export::summary::{CycleError, CyclePhase, CycleSummary};
use crate::domain::{CustomerId, OrderId, Result};
use std::sync::Arc;
use std::time::Instant;

/// Full detect-then-export pass over both entity types
pub struct SyncCycle {
    detector: ChangeDetector,
    customer_exporter: ExportCoordinator<CustomerExport>,
    order_exporter: ExportCoordinator<OrderExport>,
}

impl SyncCycle {
    /// Wire a cycle over the given stores
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        orders: Arc<dyn OrderRepository>,
        customer_markers: Arc<dyn MarkerStore<CustomerId>>,
        order_markers: Arc<dyn MarkerStore<OrderId>>,
        objects: Arc<dyn ObjectStore>,
        dry_run: bool,
    ) -> Self {
        let detector = ChangeDetector::new(
            customers.clone(),
            orders.clone(),
            customer_markers.clone(),
            order_markers.clone(),
        );
        let customer_exporter = ExportCoordinator::new(
            CustomerExport,
            customer_markers,
            objects.clone(),
            dry_run,
        );
        let order_exporter = ExportCoordinator::new(
            OrderExport::new(customers),
            order_markers,
            objects,
            dry_run,
        );
        Self {
            detector,
            customer_exporter,
            order_exporter,
        }
    }

    /// Run one full cycle
    ///
    /// Never fails as a whole; per-half errors are recorded in the returned
    /// summary. A cycle over unchanged data performs no writes and uploads
    /// nothing.
    pub async fn run(&self) -> CycleSummary {
        let start = Instant::now();
        let mut summary = CycleSummary::new();
        tracing::info!("Starting sync cycle");

        if let Err(e) = self.run_customers(&mut summary).await {
            tracing::error!(error = %e, "Customer sync failed");
            summary.add_error(CycleError::new(CyclePhase::Customers, e.to_string()));
        }
        if let Err(e) = self.run_orders(&mut summary).await {
            tracing::error!(error = %e, "Order sync failed");
            summary.add_error(CycleError::new(CyclePhase::Orders, e.to_string()));
        }

        let summary = summary.with_duration(start.elapsed());
        summary.log_summary();
        summary
    }

    /// Detect and export unsynced customers
    async fn run_customers(&self, summary: &mut CycleSummary) -> Result<()> {
        let unsynced = self.detector.unsynced_customers().await?;
        summary.customers_detected = unsynced.len();
        if unsynced.is_empty() {
            tracing::info!("No unsynced customers found");
            return Ok(());
        }
        let outcome = self.customer_exporter.export_and_upload(unsynced).await?;
        summary.customers_exported = outcome.exported;
        summary.objects.extend(outcome.objects);
        Ok(())
    }

    /// Detect and export unsynced orders
    async fn run_orders(&self, summary: &mut CycleSummary) -> Result<()> {
        let unsynced = self.detector.unsynced_orders().await?;
        summary.orders_detected = unsynced.len();
        if unsynced.is_empty() {
            tracing::info!("No unsynced orders found");
            return Ok(());
        }
        let outcome = self.order_exporter.export_and_upload(unsynced).await?;
        summary.orders_exported = outcome.exported;
        summary.objects.extend(outcome.objects);
        Ok(())
    }
}
