//! In-memory fake adapters shared by the integration tests
//!
//! The fakes implement the same ports as the PostgreSQL and S3 adapters and
//! add failure injection so the commit/compensate protocol can be driven
//! through its error paths.

#![allow(dead_code)]

use async_trait::async_trait;
use fracht::adapters::store::{
    CustomerRepository, MarkerStore, MarkerTx, ObjectStore, OrderRepository, VersionToken,
};
use fracht::domain::errors::{ObjectStoreError, TrackingError};
use fracht::domain::{Customer, CustomerId, Order, Result, SyncMarker};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Customer repository over an in-memory list
pub struct MemoryCustomerRepository {
    customers: Mutex<Vec<Customer>>,
    fail_find_all: AtomicBool,
}

impl MemoryCustomerRepository {
    pub fn new(customers: Vec<Customer>) -> Self {
        Self {
            customers: Mutex::new(customers),
            fail_find_all: AtomicBool::new(false),
        }
    }

    /// Replace the stored rows, simulating upstream changes between cycles
    pub fn replace(&self, customers: Vec<Customer>) {
        *self.customers.lock().unwrap() = customers;
    }

    /// Make the next `find_all` calls fail
    pub fn fail_find_all(&self, fail: bool) {
        self.fail_find_all.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CustomerRepository for MemoryCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>> {
        if self.fail_find_all.load(Ordering::SeqCst) {
            return Err(TrackingError::QueryFailed("injected scan failure".to_string()).into());
        }
        Ok(self.customers.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
}

/// Order repository over an in-memory list
pub struct MemoryOrderRepository {
    orders: Mutex<Vec<Order>>,
}

impl MemoryOrderRepository {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: Mutex::new(orders),
        }
    }

    pub fn replace(&self, orders: Vec<Order>) {
        *self.orders.lock().unwrap() = orders;
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn find_all(&self) -> Result<Vec<Order>> {
        Ok(self.orders.lock().unwrap().clone())
    }
}

/// Marker store over an in-memory map with commit failure injection
pub struct MemoryMarkerStore<Id> {
    markers: Arc<Mutex<HashMap<String, SyncMarker<Id>>>>,
    fail_commit: Arc<AtomicBool>,
}

impl<Id> MemoryMarkerStore<Id> {
    pub fn new() -> Self {
        Self {
            markers: Arc::new(Mutex::new(HashMap::new())),
            fail_commit: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make transaction commits fail until reset
    pub fn fail_commit(&self, fail: bool) {
        self.fail_commit.store(fail, Ordering::SeqCst);
    }

    pub fn marker_count(&self) -> usize {
        self.markers.lock().unwrap().len()
    }
}

impl<Id: Clone> MemoryMarkerStore<Id> {
    /// Synchronous snapshot of all markers, for assertions
    pub fn find_all_snapshot(&self) -> Vec<SyncMarker<Id>> {
        self.markers.lock().unwrap().values().cloned().collect()
    }
}

impl<Id> Default for MemoryMarkerStore<Id> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<Id> MarkerStore<Id> for MemoryMarkerStore<Id>
where
    Id: Display + Clone + Send + Sync + 'static,
{
    async fn exists(&self, id: &Id) -> Result<bool> {
        Ok(self.markers.lock().unwrap().contains_key(&id.to_string()))
    }

    async fn find(&self, id: &Id) -> Result<Option<SyncMarker<Id>>> {
        Ok(self.markers.lock().unwrap().get(&id.to_string()).cloned())
    }

    async fn find_all(&self) -> Result<Vec<SyncMarker<Id>>> {
        Ok(self.markers.lock().unwrap().values().cloned().collect())
    }

    async fn begin(&self) -> Result<Box<dyn MarkerTx<Id>>> {
        Ok(Box::new(MemoryMarkerTx {
            staged: Vec::new(),
            markers: self.markers.clone(),
            fail_commit: self.fail_commit.clone(),
        }))
    }
}

struct MemoryMarkerTx<Id> {
    staged: Vec<SyncMarker<Id>>,
    markers: Arc<Mutex<HashMap<String, SyncMarker<Id>>>>,
    fail_commit: Arc<AtomicBool>,
}

#[async_trait]
impl<Id> MarkerTx<Id> for MemoryMarkerTx<Id>
where
    Id: Display + Clone + Send + Sync + 'static,
{
    async fn upsert(&mut self, marker: SyncMarker<Id>) -> Result<()> {
        self.staged.push(marker);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(
                TrackingError::TransactionFailed("injected commit failure".to_string()).into(),
            );
        }
        let mut markers = self.markers.lock().unwrap();
        for marker in self.staged {
            markers.insert(marker.entity_id.to_string(), marker);
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        // Staged upserts are simply dropped.
        Ok(())
    }
}

/// One stored blob with its metadata
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub version: VersionToken,
}

/// Object store over an in-memory map with put failure injection
///
/// Every successful put mints a fresh version token, so an unchanged token
/// across cycles proves the object was not rewritten.
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, StoredBlob>>,
    next_version: AtomicU64,
    put_attempts: AtomicU64,
    fail_puts_from: Mutex<Option<u64>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            next_version: AtomicU64::new(1),
            put_attempts: AtomicU64::new(0),
            fail_puts_from: Mutex::new(None),
        }
    }

    /// Fail every put attempt with zero-based index >= `n`
    pub fn fail_puts_from(&self, n: u64) {
        *self.fail_puts_from.lock().unwrap() = Some(n);
    }

    pub fn clear_failures(&self) {
        *self.fail_puts_from.lock().unwrap() = None;
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn get(&self, key: &str) -> Option<StoredBlob> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn version_of(&self, key: &str) -> Option<VersionToken> {
        self.get(key).map(|blob| blob.version)
    }

    /// Total put attempts, including failed ones
    pub fn put_attempts(&self) -> u64 {
        self.put_attempts.load(Ordering::SeqCst)
    }
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<VersionToken> {
        let attempt = self.put_attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(from) = *self.fail_puts_from.lock().unwrap() {
            if attempt >= from {
                return Err(ObjectStoreError::UploadFailed {
                    key: key.to_string(),
                    message: "injected upload failure".to_string(),
                }
                .into());
            }
        }
        let version = VersionToken::new(format!(
            "\"v{}\"",
            self.next_version.fetch_add(1, Ordering::SeqCst)
        ));
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredBlob {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
                version: version.clone(),
            },
        );
        Ok(version)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}
