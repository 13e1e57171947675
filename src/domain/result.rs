//! Result type alias for fracht operations

use crate::domain::errors::FrachtError;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, FrachtError>;
