//! Product ledger of the open reception.

pub mod service;

pub use service::ProductService;
