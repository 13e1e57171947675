//! Domain models and types for fracht.
//!
//! This module contains the core domain models, types, and business rules.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`CustomerId`], [`OrderId`])
//! - **Source entities** ([`Customer`], [`Order`])
//! - **Sync tracking types** ([`SyncMarker`], [`Fingerprint`])
//! - **Error types** ([`FrachtError`], [`TrackingError`], [`ObjectStoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers use the newtype pattern so customer and order ids cannot be
//! mixed up:
//!
//! ```rust
//! use fracht::domain::{CustomerId, OrderId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let customer_id = CustomerId::new(42);
//! let order_id = OrderId::new("7d44b88c-4199-4bad-97dc-d78268e01398")?;
//!
//! // This won't compile - type safety prevents mixing ids
//! // let wrong: CustomerId = order_id;  // Compile error!
//! # Ok(())
//! # }
//! ```

pub mod customer;
pub mod errors;
pub mod fingerprint;
pub mod ids;
pub mod marker;
pub mod order;
pub mod result;

// Re-export commonly used types for convenience
pub use customer::Customer;
pub use errors::{FrachtError, ObjectStoreError, TrackingError};
pub use fingerprint::Fingerprint;
pub use ids::{CustomerId, OrderId};
pub use marker::SyncMarker;
pub use order::Order;
pub use result::Result;
