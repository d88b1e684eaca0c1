//! # pvz-database
//!
//! PostgreSQL connection management and the repositories that own all
//! durable point, reception, product and user state. Every multi-step
//! mutation runs in a single transaction.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
