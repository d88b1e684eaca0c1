//! Login, logout and throwaway sessions.

pub mod service;

pub use service::SessionService;
