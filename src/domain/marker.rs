//! Sync marker model
//!
//! A sync marker records, per entity, the fingerprint that was last
//! successfully exported and when. Presence of a marker whose fingerprint
//! equals the entity's current fingerprint means "this exact content has
//! already been exported"; any other state means the entity must be
//! (re-)exported.
//!
//! Markers are written exclusively by the export coordinator and read by the
//! change detector. They are overwritten on every export, never versioned.

use crate::domain::fingerprint::Fingerprint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-entity record of the last exported fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncMarker<Id> {
    /// Id of the tracked entity
    pub entity_id: Id,

    /// Fingerprint of the content that was last exported
    pub fingerprint: Fingerprint,

    /// When the marker was last written; set to "now" on every write
    pub last_synced_at: DateTime<Utc>,
}

impl<Id> SyncMarker<Id> {
    /// Creates a marker stamped with the current time
    pub fn new(entity_id: Id, fingerprint: Fingerprint) -> Self {
        Self {
            entity_id,
            fingerprint,
            last_synced_at: Utc::now(),
        }
    }

    /// Whether the marker records exactly the given fingerprint
    pub fn matches(&self, fingerprint: &Fingerprint) -> bool {
        &self.fingerprint == fingerprint
    }
}
