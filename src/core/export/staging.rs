//! Two-phase upload staging
//!
//! Replaces an implicit transaction-hook upload with an explicit
//! coordinator the caller drives: [`stage`](UploadStaging::stage) collects
//! (key, payload) pairs, [`commit`](UploadStaging::commit) uploads them and
//! records which keys made it, and [`compensate`](UploadStaging::compensate)
//! deletes every uploaded key after the surrounding local writes failed.
//!
//! Compensation is best effort: delete failures are logged and swallowed,
//! which can leave an orphaned object in the external store.

use crate::adapters::store::{ObjectStore, VersionToken};
use crate::domain::Result;
use std::sync::Arc;

/// An object that was uploaded during this cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Destination key in the object store
    pub key: String,

    /// Version token reported by the store (e.g. an ETag)
    pub version: VersionToken,
}

/// Pending uploads for one export batch
pub struct UploadStaging {
    store: Arc<dyn ObjectStore>,
    content_type: &'static str,
    pending: Vec<(String, Vec<u8>)>,
    uploaded: Vec<StoredObject>,
}

impl UploadStaging {
    /// Create an empty staging area against the given store
    pub fn new(store: Arc<dyn ObjectStore>, content_type: &'static str) -> Self {
        Self {
            store,
            content_type,
            pending: Vec::new(),
            uploaded: Vec::new(),
        }
    }

    /// Stage one payload for upload under the given key
    pub fn stage(&mut self, key: String, payload: Vec<u8>) {
        self.pending.push((key, payload));
    }

    /// Number of staged, not yet uploaded payloads
    pub fn staged(&self) -> usize {
        self.pending.len()
    }

    /// Upload every staged payload, in staging order
    ///
    /// Keys that upload successfully are recorded so a later
    /// [`compensate`](Self::compensate) can remove them. On the first
    /// failed upload the error propagates; earlier uploads of this batch
    /// stay recorded.
    pub async fn commit(&mut self) -> Result<Vec<StoredObject>> {
        for (key, payload) in self.pending.drain(..) {
            tracing::info!(key = %key, bytes = payload.len(), "Uploading object");
            let version = self.store.put(&key, &payload, self.content_type).await?;
            self.uploaded.push(StoredObject { key, version });
        }
        Ok(self.uploaded.clone())
    }

    /// Delete every object uploaded by this staging, best effort
    ///
    /// Invoked after the surrounding local writes rolled back. Failures are
    /// logged and swallowed.
    pub async fn compensate(&mut self) {
        for object in self.uploaded.drain(..) {
            if let Err(e) = self.store.delete(&object.key).await {
                tracing::warn!(key = %object.key, error = %e, "Cleanup failed for uploaded object");
            }
        }
    }
}
