//! Core traits defined in `pvz-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
