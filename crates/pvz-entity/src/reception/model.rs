//! Reception entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pvz_core::types::{PointId, ReceptionId};

use super::status::ReceptionStatus;

/// One goods-intake session at a point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reception {
    /// Unique reception identifier.
    pub id: ReceptionId,
    /// Creation time.
    pub date_time: DateTime<Utc>,
    /// The point this reception belongs to.
    pub pvz_id: PointId,
    /// Lifecycle status.
    pub status: ReceptionStatus,
}
