//! Goods reception entities.

pub mod model;
pub mod status;

pub use model::Reception;
pub use status::ReceptionStatus;
