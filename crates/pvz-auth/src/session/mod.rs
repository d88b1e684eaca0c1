//! Cache-backed session lifecycle: issue, validate, revoke.

pub mod store;

pub use store::{IssuedToken, Session, SessionStore};
