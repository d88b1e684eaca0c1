//! Nested read model returned by the point listing.

use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::reception::Reception;

use super::model::Point;

/// A point with its receptions, each carrying its products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointWithReceptions {
    /// The point itself.
    pub pvz: Point,
    /// Receptions ordered by creation time, newest first.
    pub receptions: Vec<ReceptionWithProducts>,
}

/// A reception with its products in creation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceptionWithProducts {
    /// The reception.
    pub reception: Reception,
    /// Products, oldest first.
    pub products: Vec<Product>,
}
