//! Storage abstraction traits
//!
//! This module defines the ports the core engine depends on: read-only
//! source repositories, the marker store with its transactional batch, and
//! the external object store. Adapters (PostgreSQL, S3) implement these
//! traits; tests substitute in-memory fakes.

use crate::domain::{Customer, CustomerId, Order, Result, SyncMarker};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Read-only access to the customer source table
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Load all customers
    async fn find_all(&self) -> Result<Vec<Customer>>;

    /// Load a single customer by id
    ///
    /// Returns `Ok(None)` when no such customer exists.
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>>;
}

/// Read-only access to the order source table
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Load all orders
    async fn find_all(&self) -> Result<Vec<Order>>;
}

/// Persistence for sync markers of one entity type
///
/// Reads serve the change detector; writes go through [`MarkerTx`] so the
/// export coordinator can keep marker persistence and upload staging inside
/// one local transaction boundary.
#[async_trait]
pub trait MarkerStore<Id>: Send + Sync
where
    Id: Send + Sync,
{
    /// Whether a marker exists for the given entity id
    async fn exists(&self, id: &Id) -> Result<bool>;

    /// Load the marker for the given entity id
    ///
    /// Returns `Ok(None)` when no marker exists.
    async fn find(&self, id: &Id) -> Result<Option<SyncMarker<Id>>>;

    /// Load all markers (used by the status command)
    async fn find_all(&self) -> Result<Vec<SyncMarker<Id>>>;

    /// Open a transaction for a batch of marker upserts
    ///
    /// Upserts performed on the returned transaction become durable only
    /// when [`MarkerTx::commit`] succeeds.
    async fn begin(&self) -> Result<Box<dyn MarkerTx<Id>>>;
}

/// An open marker-upsert transaction
///
/// Must be finished with exactly one of [`commit`](MarkerTx::commit) or
/// [`rollback`](MarkerTx::rollback).
#[async_trait]
pub trait MarkerTx<Id>: Send
where
    Id: Send,
{
    /// Insert or overwrite the marker for its entity id
    async fn upsert(&mut self, marker: SyncMarker<Id>) -> Result<()>;

    /// Make all upserts of this transaction durable
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Discard all upserts of this transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Version token reported by the object store for an uploaded object
///
/// For S3 this is the ETag. Used as a lightweight verification token: an
/// unchanged token across cycles means the object was not rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionToken(String);

impl VersionToken {
    /// Wraps a token string as reported by the store
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Durable external blob store with per-object version tokens
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload an object, replacing any existing object under the same key
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<VersionToken>;

    /// Delete the object under the given key
    ///
    /// Errors propagate to the caller; the upload staging decides whether
    /// to swallow them.
    async fn delete(&self, key: &str) -> Result<()>;
}
