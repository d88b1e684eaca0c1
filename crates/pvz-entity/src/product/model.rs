//! Product entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pvz_core::types::{ProductId, ReceptionId};

use super::kind::ProductKind;

/// One item recorded within a reception.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Creation time.
    pub date_time: DateTime<Utc>,
    /// Product kind.
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: ProductKind,
    /// The reception this product belongs to.
    pub reception_id: ReceptionId,
}
