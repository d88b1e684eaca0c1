//! # pvz-cache
//!
//! Session cache providers for the PVZ service. Supports two modes:
//!
//! - **memory**: In-process cache using [moka](https://crates.io/crates/moka)
//!   with per-entry TTL. Single node only; used by tests and local runs.
//! - **redis**: Redis-backed cache shared by every service instance.
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
