//! Domain error types
//!
//! This module defines the error hierarchy for fracht. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main fracht error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum FrachtError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Tracking-store errors (source tables and sync markers)
    #[error("Tracking store error: {0}")]
    Tracking(#[from] TrackingError),

    /// Object-store errors
    #[error("Object store error: {0}")]
    ObjectStore(#[from] ObjectStoreError),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Tracking-store specific errors
///
/// Errors that occur when reading source entities or reading/writing sync
/// markers. These errors don't expose the underlying database driver types.
#[derive(Debug, Error)]
pub enum TrackingError {
    /// Failed to connect to the tracking database
    #[error("Failed to connect to tracking database: {0}")]
    ConnectionFailed(String),

    /// Query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction begin/commit/rollback failed
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// A fetched row could not be mapped to a domain type
    #[error("Row mapping failed: {0}")]
    RowMapping(String),

    /// A sync marker existed moments ago but is gone now.
    ///
    /// The tracking tables have a single writer and cycles never overlap,
    /// so this state is unreachable under the documented contract.
    #[error("Sync marker for entity {entity_id} vanished between existence check and load")]
    StaleMarker { entity_id: String },
}

/// Object-store specific errors
///
/// Errors that occur when interacting with the external object store.
/// These errors don't expose the AWS SDK types.
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    /// Failed to upload an object
    #[error("Upload failed for key {key}: {message}")]
    UploadFailed { key: String, message: String },

    /// Failed to delete an object
    #[error("Delete failed for key {key}: {message}")]
    DeleteFailed { key: String, message: String },

    /// Failed to build or configure the client
    #[error("Object store client error: {0}")]
    ClientError(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for FrachtError {
    fn from(err: std::io::Error) -> Self {
        FrachtError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for FrachtError {
    fn from(err: serde_json::Error) -> Self {
        FrachtError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for FrachtError {
    fn from(err: toml::de::Error) -> Self {
        FrachtError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fracht_error_display() {
        let err = FrachtError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_tracking_error_conversion() {
        let tracking_err = TrackingError::ConnectionFailed("Network error".to_string());
        let err: FrachtError = tracking_err.into();
        assert!(matches!(err, FrachtError::Tracking(_)));
    }

    #[test]
    fn test_object_store_error_conversion() {
        let store_err = ObjectStoreError::UploadFailed {
            key: "kunde_DE_20250101_09.csv".to_string(),
            message: "503".to_string(),
        };
        let err: FrachtError = store_err.into();
        assert!(matches!(err, FrachtError::ObjectStore(_)));
    }

    #[test]
    fn test_stale_marker_display() {
        let err = TrackingError::StaleMarker {
            entity_id: "42".to_string(),
        };
        assert!(err.to_string().contains("42"));
        assert!(err.to_string().contains("vanished"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: FrachtError = io_err.into();
        assert!(matches!(err, FrachtError::Io(_)));
    }

    #[test]
    fn test_fracht_error_implements_std_error() {
        let err = FrachtError::Export("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
