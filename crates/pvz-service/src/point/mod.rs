//! Pick-up point registry.

pub mod service;

pub use service::PointService;
