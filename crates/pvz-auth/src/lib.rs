//! # pvz-auth
//!
//! Authentication and authorization for the PVZ service.
//!
//! ## Modules
//!
//! - `jwt`: signed, time-limited token creation and verification
//! - `session`: cache-backed session validity (issue, validate, revoke)
//! - `rbac`: static role-to-operation access policy
//! - `password`: Argon2id password hashing

pub mod jwt;
pub mod password;
pub mod rbac;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use rbac::{Operation, RbacEnforcer};
pub use session::{IssuedToken, Session, SessionStore};
