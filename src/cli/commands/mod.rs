//! CLI command implementations

pub mod init;
pub mod run;
pub mod status;
pub mod sync;
pub mod validate;

use crate::adapters::postgres::{
    PgCustomerMarkerStore, PgCustomerRepository, PgOrderMarkerStore, PgOrderRepository,
    PostgresClient,
};
use crate::adapters::s3::S3ObjectStore;
use crate::adapters::store::{CustomerRepository, MarkerStore, ObjectStore, OrderRepository};
use crate::config::FrachtConfig;
use crate::core::export::SyncCycle;
use crate::domain::{CustomerId, OrderId, Result};
use std::sync::Arc;

/// Wire a [`SyncCycle`] from configuration
///
/// Connects to the tracking database, ensures the marker tables exist, and
/// builds the S3 client.
pub(crate) async fn build_cycle(config: &FrachtConfig) -> Result<SyncCycle> {
    let client = Arc::new(PostgresClient::new(&config.database)?);
    client.test_connection().await?;
    client.ensure_marker_tables().await?;

    let customers: Arc<dyn CustomerRepository> =
        Arc::new(PgCustomerRepository::new(client.clone()));
    let orders: Arc<dyn OrderRepository> = Arc::new(PgOrderRepository::new(client.clone()));
    let customer_markers: Arc<dyn MarkerStore<CustomerId>> =
        Arc::new(PgCustomerMarkerStore::new(client.clone()));
    let order_markers: Arc<dyn MarkerStore<OrderId>> =
        Arc::new(PgOrderMarkerStore::new(client.clone()));
    let objects: Arc<dyn ObjectStore> = Arc::new(S3ObjectStore::new(&config.s3).await?);

    Ok(SyncCycle::new(
        customers,
        orders,
        customer_markers,
        order_markers,
        objects,
        config.application.dry_run,
    ))
}
