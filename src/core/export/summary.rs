//! Cycle summary and reporting

use crate::core::export::staging::StoredObject;
use std::fmt;
use std::time::Duration;

/// Which half of the cycle an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    /// The customer detect+export half
    Customers,
    /// The order detect+export half
    Orders,
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CyclePhase::Customers => write!(f, "customers"),
            CyclePhase::Orders => write!(f, "orders"),
        }
    }
}

/// An error recorded during one cycle
#[derive(Debug, Clone)]
pub struct CycleError {
    /// Which half failed
    pub phase: CyclePhase,

    /// Error message
    pub message: String,
}

impl CycleError {
    /// Create a new cycle error
    pub fn new(phase: CyclePhase, message: impl Into<String>) -> Self {
        Self {
            phase,
            message: message.into(),
        }
    }
}

/// Summary of one sync cycle
#[derive(Debug, Clone, Default)]
pub struct CycleSummary {
    /// Customers found unsynced by detection
    pub customers_detected: usize,

    /// Customers whose markers were persisted and payload uploaded
    pub customers_exported: usize,

    /// Orders found unsynced by detection
    pub orders_detected: usize,

    /// Orders whose markers were persisted and payload uploaded
    pub orders_exported: usize,

    /// Objects uploaded during this cycle
    pub objects: Vec<StoredObject>,

    /// Errors encountered during this cycle
    pub errors: Vec<CycleError>,

    /// Duration of the cycle
    pub duration: Duration,
}

impl CycleSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record an error
    pub fn add_error(&mut self, error: CycleError) {
        self.errors.push(error);
    }

    /// Whether the cycle completed without errors
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Log the summary at info level (warn when errors were recorded)
    pub fn log_summary(&self) {
        if self.is_success() {
            tracing::info!(
                customers_detected = self.customers_detected,
                customers_exported = self.customers_exported,
                orders_detected = self.orders_detected,
                orders_exported = self.orders_exported,
                objects_uploaded = self.objects.len(),
                duration_ms = self.duration.as_millis() as u64,
                "Sync cycle completed"
            );
        } else {
            tracing::warn!(
                customers_detected = self.customers_detected,
                customers_exported = self.customers_exported,
                orders_detected = self.orders_detected,
                orders_exported = self.orders_exported,
                objects_uploaded = self.objects.len(),
                errors = self.errors.len(),
                duration_ms = self.duration.as_millis() as u64,
                "Sync cycle completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(phase = %error.phase, message = %error.message, "Cycle error");
            }
        }
    }
}
