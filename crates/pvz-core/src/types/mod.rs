//! Core type definitions used across the PVZ workspace.

pub mod id;
pub mod pagination;

pub use id::*;
pub use pagination::{DateRange, PageRequest};
