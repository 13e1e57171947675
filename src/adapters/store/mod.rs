//! Storage ports consumed by the core engine

pub mod traits;

pub use traits::{
    CustomerRepository, MarkerStore, MarkerTx, ObjectStore, OrderRepository, VersionToken,
};
