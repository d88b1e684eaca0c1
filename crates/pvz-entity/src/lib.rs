//! # pvz-entity
//!
//! Domain entity models for the PVZ service. Every struct in this crate
//! represents a database row or a composed read model. Allow-lists (cities,
//! product kinds, reception statuses, roles) are closed enums shared by
//! request decoding, services and the PostgreSQL enum types.

pub mod point;
pub mod product;
pub mod reception;
pub mod user;
