//! Custom Axum extractors.

pub mod auth;
pub mod body;
pub mod pagination;

pub use auth::AuthUser;
pub use body::{ApiJson, ApiQuery};
pub use pagination::ListPointsQuery;
