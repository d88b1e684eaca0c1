//! # pvz-core
//!
//! Core crate for the PVZ service. Contains the cache provider trait,
//! configuration schemas, typed identifiers, pagination types, Prometheus
//! metrics, and the unified error system.
//!
//! This crate has **no** internal dependencies on other PVZ crates.

pub mod config;
pub mod error;
pub mod metrics;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use metrics::Metrics;
pub use result::AppResult;
