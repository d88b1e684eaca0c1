//! # pvz-service
//!
//! Business logic for the PVZ service. Each service checks the caller's
//! role against the access policy before touching the store, then
//! delegates to the repositories in `pvz-database`.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod point;
pub mod product;
pub mod reception;
pub mod session;
pub mod user;

pub use context::RequestContext;
pub use point::PointService;
pub use product::ProductService;
pub use reception::ReceptionService;
pub use session::SessionService;
pub use user::UserService;
