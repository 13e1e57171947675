//! S3 object store adapter

pub mod client;

pub use client::S3ObjectStore;
