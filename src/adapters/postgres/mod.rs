//! PostgreSQL adapter for the tracking database
//!
//! Implements the source repositories and marker stores over the upstream
//! `kunde`/`auftraege` tables and the fracht-owned marker tables.

pub mod client;
pub mod markers;
pub mod source;

pub use client::PostgresClient;
pub use markers::{PgCustomerMarkerStore, PgOrderMarkerStore};
pub use source::{PgCustomerRepository, PgOrderRepository};
