//! Role-based access control for PVZ operations.

pub mod enforcer;
pub mod policies;

pub use enforcer::RbacEnforcer;
pub use policies::{Operation, allowed};
