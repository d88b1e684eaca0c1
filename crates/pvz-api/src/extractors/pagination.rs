//! Query parameters of the point listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pvz_core::error::AppError;
use pvz_core::types::{DateRange, PageRequest};

/// `GET /pvz` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPointsQuery {
    /// Inclusive lower bound on reception time (RFC 3339).
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on reception time (RFC 3339).
    pub end_date: Option<DateTime<Utc>>,
    /// Page number, 1-based (default: 1).
    pub page: Option<u32>,
    /// Points per page (default: 10, max: 30).
    pub limit: Option<u32>,
}

impl ListPointsQuery {
    /// Validates and splits into a page request and a date window.
    pub fn into_parts(self) -> Result<(PageRequest, DateRange), AppError> {
        let page = PageRequest::new(self.page, self.limit)?;
        let range = DateRange::new(self.start_date, self.end_date)?;
        Ok((page, range))
    }
}
