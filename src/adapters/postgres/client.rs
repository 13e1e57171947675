//! PostgreSQL client
//!
//! Pooled connection handling for the tracking database. Both the source
//! tables and the marker tables live in the same database.

use crate::config::DatabaseConfig;
use crate::domain::errors::TrackingError;
use crate::domain::Result;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use std::time::Duration;
use tokio_postgres::NoTls;

/// Pooled PostgreSQL client
pub struct PostgresClient {
    pool: Pool,
}

impl PostgresClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid or the pool
    /// cannot be built. No connection is attempted yet; use
    /// [`test_connection`](Self::test_connection) for that.
    pub fn new(config: &DatabaseConfig) -> Result<Self> {
        let pg_config: tokio_postgres::Config =
            config.connection_string.parse().map_err(|e| {
                crate::domain::FrachtError::Configuration(format!(
                    "Invalid PostgreSQL connection string: {}",
                    e
                ))
            })?;

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .create_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .recycle_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .build()
            .map_err(|e| {
                TrackingError::ConnectionFailed(format!("Failed to create connection pool: {}", e))
            })?;

        Ok(Self { pool })
    }

    /// Get a connection from the pool
    pub async fn get(&self) -> Result<deadpool_postgres::Object> {
        self.pool.get().await.map_err(|e| {
            TrackingError::ConnectionFailed(format!("Failed to get connection from pool: {}", e))
                .into()
        })
    }

    /// Test the connection with a trivial query
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get().await?;
        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| TrackingError::ConnectionFailed(format!("Connection test failed: {}", e)))?;
        tracing::info!("PostgreSQL connection test successful");
        Ok(())
    }

    /// Ensure the marker tables exist
    ///
    /// Runs the bundled migration; safe to call on every start.
    pub async fn ensure_marker_tables(&self) -> Result<()> {
        let client = self.get().await?;
        let migration_sql = include_str!("../../../migrations/001_marker_tables.sql");
        client.batch_execute(migration_sql).await.map_err(|e| {
            TrackingError::QueryFailed(format!("Failed to create marker tables: {}", e))
        })?;
        tracing::info!("Marker tables ready");
        Ok(())
    }
}
