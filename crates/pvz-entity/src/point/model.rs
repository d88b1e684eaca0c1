//! Pick-up point entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pvz_core::types::PointId;

use super::city::City;

/// A registered pick-up point. Never updated or deleted once inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    /// Unique point identifier.
    pub id: PointId,
    /// Set at insertion and never mutated.
    pub registration_date: DateTime<Utc>,
    /// Location from the allow-list.
    pub city: City,
}
