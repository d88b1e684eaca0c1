//! Pick-up point entities.

pub mod city;
pub mod listing;
pub mod model;

pub use city::City;
pub use listing::{PointWithReceptions, ReceptionWithProducts};
pub use model::Point;
