//! Product entities.

pub mod kind;
pub mod model;

pub use kind::ProductKind;
pub use model::Product;
