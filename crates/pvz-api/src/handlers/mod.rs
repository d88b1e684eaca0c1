//! Route handlers organized by domain.

pub mod auth;
pub mod health;
pub mod point;
pub mod product;
pub mod reception;
