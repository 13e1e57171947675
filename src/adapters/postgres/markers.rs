//! Marker store adapters
//!
//! One store per marker table (`synced_kunde_hash`, `synced_auftrag_hash`).
//! Upserts run inside an explicit transaction held on one pooled
//! connection: `begin` issues `BEGIN`, and the returned transaction object
//! keeps the connection until `COMMIT` or `ROLLBACK`.

use crate::adapters::postgres::client::PostgresClient;
use crate::adapters::store::{MarkerStore, MarkerTx};
use crate::domain::errors::TrackingError;
use crate::domain::{CustomerId, Fingerprint, OrderId, Result, SyncMarker};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Customer marker store over `synced_kunde_hash`
pub struct PgCustomerMarkerStore {
    client: Arc<PostgresClient>,
}

impl PgCustomerMarkerStore {
    /// Create a store over the given client
    pub fn new(client: Arc<PostgresClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MarkerStore<CustomerId> for PgCustomerMarkerStore {
    async fn exists(&self, id: &CustomerId) -> Result<bool> {
        let client = self.client.get().await?;
        let id_value = id.value();
        let row = client
            .query_one(
                "SELECT EXISTS(SELECT 1 FROM synced_kunde_hash WHERE kundenid = $1)",
                &[&id_value],
            )
            .await
            .map_err(|e| TrackingError::QueryFailed(format!("Marker existence check failed: {}", e)))?;
        Ok(row.get(0))
    }

    async fn find(&self, id: &CustomerId) -> Result<Option<SyncMarker<CustomerId>>> {
        let client = self.client.get().await?;
        let id_value = id.value();
        let row = client
            .query_opt(
                "SELECT kundenid, row_hash, last_synced_at FROM synced_kunde_hash \
                 WHERE kundenid = $1",
                &[&id_value],
            )
            .await
            .map_err(|e| TrackingError::QueryFailed(format!("Marker lookup failed: {}", e)))?;
        row.map(|row| map_customer_marker(&row)).transpose()
    }

    async fn find_all(&self) -> Result<Vec<SyncMarker<CustomerId>>> {
        let client = self.client.get().await?;
        let rows = client
            .query(
                "SELECT kundenid, row_hash, last_synced_at FROM synced_kunde_hash \
                 ORDER BY kundenid",
                &[],
            )
            .await
            .map_err(|e| TrackingError::QueryFailed(format!("Marker scan failed: {}", e)))?;
        rows.iter().map(map_customer_marker).collect()
    }

    async fn begin(&self) -> Result<Box<dyn MarkerTx<CustomerId>>> {
        let client = self.client.get().await?;
        client
            .batch_execute("BEGIN")
            .await
            .map_err(|e| TrackingError::TransactionFailed(format!("BEGIN failed: {}", e)))?;
        Ok(Box::new(PgCustomerMarkerTx {
            client,
            finished: false,
        }))
    }
}

fn map_customer_marker(row: &tokio_postgres::Row) -> Result<SyncMarker<CustomerId>> {
    let id: i64 = row
        .try_get("kundenid")
        .map_err(|e| TrackingError::RowMapping(format!("synced_kunde_hash.kundenid: {e}")))?;
    let hash: String = row
        .try_get("row_hash")
        .map_err(|e| TrackingError::RowMapping(format!("synced_kunde_hash.row_hash: {e}")))?;
    let last_synced_at: DateTime<Utc> = row
        .try_get("last_synced_at")
        .map_err(|e| TrackingError::RowMapping(format!("synced_kunde_hash.last_synced_at: {e}")))?;
    Ok(SyncMarker {
        entity_id: CustomerId::new(id),
        fingerprint: Fingerprint::from_hex(hash),
        last_synced_at,
    })
}

/// Open transaction on `synced_kunde_hash`
struct PgCustomerMarkerTx {
    client: deadpool_postgres::Object,
    finished: bool,
}

#[async_trait]
impl MarkerTx<CustomerId> for PgCustomerMarkerTx {
    async fn upsert(&mut self, marker: SyncMarker<CustomerId>) -> Result<()> {
        let id_value = marker.entity_id.value();
        self.client
            .execute(
                "INSERT INTO synced_kunde_hash (kundenid, row_hash, last_synced_at) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (kundenid) DO UPDATE SET \
                 row_hash = EXCLUDED.row_hash, last_synced_at = EXCLUDED.last_synced_at",
                &[&id_value, &marker.fingerprint.as_str(), &marker.last_synced_at],
            )
            .await
            .map_err(|e| TrackingError::QueryFailed(format!("Marker upsert failed: {}", e)))?;
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> Result<()> {
        self.finished = true;
        self.client
            .batch_execute("COMMIT")
            .await
            .map_err(|e| TrackingError::TransactionFailed(format!("COMMIT failed: {}", e)).into())
    }

    async fn rollback(mut self: Box<Self>) -> Result<()> {
        self.finished = true;
        self.client
            .batch_execute("ROLLBACK")
            .await
            .map_err(|e| TrackingError::TransactionFailed(format!("ROLLBACK failed: {}", e)).into())
    }
}

impl Drop for PgCustomerMarkerTx {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!("Customer marker transaction dropped without commit or rollback");
        }
    }
}

/// Order marker store over `synced_auftrag_hash`
pub struct PgOrderMarkerStore {
    client: Arc<PostgresClient>,
}

impl PgOrderMarkerStore {
    /// Create a store over the given client
    pub fn new(client: Arc<PostgresClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MarkerStore<OrderId> for PgOrderMarkerStore {
    async fn exists(&self, id: &OrderId) -> Result<bool> {
        let client = self.client.get().await?;
        let row = client
            .query_one(
                "SELECT EXISTS(SELECT 1 FROM synced_auftrag_hash WHERE auftragid = $1)",
                &[&id.as_str()],
            )
            .await
            .map_err(|e| TrackingError::QueryFailed(format!("Marker existence check failed: {}", e)))?;
        Ok(row.get(0))
    }

    async fn find(&self, id: &OrderId) -> Result<Option<SyncMarker<OrderId>>> {
        let client = self.client.get().await?;
        let row = client
            .query_opt(
                "SELECT auftragid, marker_hash, last_synced_at FROM synced_auftrag_hash \
                 WHERE auftragid = $1",
                &[&id.as_str()],
            )
            .await
            .map_err(|e| TrackingError::QueryFailed(format!("Marker lookup failed: {}", e)))?;
        row.map(|row| map_order_marker(&row)).transpose()
    }

    async fn find_all(&self) -> Result<Vec<SyncMarker<OrderId>>> {
        let client = self.client.get().await?;
        let rows = client
            .query(
                "SELECT auftragid, marker_hash, last_synced_at FROM synced_auftrag_hash \
                 ORDER BY auftragid",
                &[],
            )
            .await
            .map_err(|e| TrackingError::QueryFailed(format!("Marker scan failed: {}", e)))?;
        rows.iter().map(map_order_marker).collect()
    }

    async fn begin(&self) -> Result<Box<dyn MarkerTx<OrderId>>> {
        let client = self.client.get().await?;
        client
            .batch_execute("BEGIN")
            .await
            .map_err(|e| TrackingError::TransactionFailed(format!("BEGIN failed: {}", e)))?;
        Ok(Box::new(PgOrderMarkerTx {
            client,
            finished: false,
        }))
    }
}

fn map_order_marker(row: &tokio_postgres::Row) -> Result<SyncMarker<OrderId>> {
    let id: String = row
        .try_get("auftragid")
        .map_err(|e| TrackingError::RowMapping(format!("synced_auftrag_hash.auftragid: {e}")))?;
    let id = OrderId::new(id)
        .map_err(|e| TrackingError::RowMapping(format!("synced_auftrag_hash.auftragid: {e}")))?;
    let hash: String = row
        .try_get("marker_hash")
        .map_err(|e| TrackingError::RowMapping(format!("synced_auftrag_hash.marker_hash: {e}")))?;
    let last_synced_at: DateTime<Utc> = row.try_get("last_synced_at").map_err(|e| {
        TrackingError::RowMapping(format!("synced_auftrag_hash.last_synced_at: {e}"))
    })?;
    Ok(SyncMarker {
        entity_id: id,
        fingerprint: Fingerprint::from_hex(hash),
        last_synced_at,
    })
}

/// Open transaction on `synced_auftrag_hash`
struct PgOrderMarkerTx {
    client: deadpool_postgres::Object,
    finished: bool,
}

#[async_trait]
impl MarkerTx<OrderId> for PgOrderMarkerTx {
    async fn upsert(&mut self, marker: SyncMarker<OrderId>) -> Result<()> {
        self.client
            .execute(
                "INSERT INTO synced_auftrag_hash (auftragid, marker_hash, last_synced_at) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (auftragid) DO UPDATE SET \
                 marker_hash = EXCLUDED.marker_hash, last_synced_at = EXCLUDED.last_synced_at",
                &[
                    &marker.entity_id.as_str(),
                    &marker.fingerprint.as_str(),
                    &marker.last_synced_at,
                ],
            )
            .await
            .map_err(|e| TrackingError::QueryFailed(format!("Marker upsert failed: {}", e)))?;
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> Result<()> {
        self.finished = true;
        self.client
            .batch_execute("COMMIT")
            .await
            .map_err(|e| TrackingError::TransactionFailed(format!("COMMIT failed: {}", e)).into())
    }

    async fn rollback(mut self: Box<Self>) -> Result<()> {
        self.finished = true;
        self.client
            .batch_execute("ROLLBACK")
            .await
            .map_err(|e| TrackingError::TransactionFailed(format!("ROLLBACK failed: {}", e)).into())
    }
}

impl Drop for PgOrderMarkerTx {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!("Order marker transaction dropped without commit or rollback");
        }
    }
}
