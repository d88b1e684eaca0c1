//! Reception lifecycle.

pub mod service;

pub use service::ReceptionService;
