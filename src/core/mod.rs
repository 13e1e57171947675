//! Core business logic for fracht.
//!
//! This module contains the change-detection and export engine:
//!
//! # Modules
//!
//! - [`fingerprint`] - stable content fingerprints (trim, join, SHA-256)
//! - [`detect`] - full-scan change detection against sync markers
//! - [`render`] - CSV payload rendering
//! - [`export`] - partition grouping, marker persistence, and the
//!   commit/compensate upload protocol

pub mod detect;
pub mod export;
pub mod fingerprint;
pub mod render;
