//! Export orchestration
//!
//! This module provides the export half of the engine:
//! - [`coordinator`] - per-partition export with the commit/compensate protocol
//! - [`cycle`] - the externally-triggered cycle entry point
//! - [`group`] - stable partition grouping
//! - [`staging`] - two-phase upload staging
//! - [`summary`] - cycle reporting

pub mod coordinator;
pub mod cycle;
pub mod group;
pub mod staging;
pub mod summary;

pub use coordinator::{
    object_key, CustomerExport, ExportCoordinator, ExportOutcome, ExportProfile, OrderExport,
    CUSTOMER_PREFIX, ORDER_PREFIX,
};
pub use cycle::SyncCycle;
pub use group::PartitionGroups;
pub use staging::{StoredObject, UploadStaging};
pub use summary::{CycleError, CyclePhase, CycleSummary};
