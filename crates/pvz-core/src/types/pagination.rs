//! Pagination and date-window types for the point listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Default page size.
pub const DEFAULT_LIMIT: u32 = 10;
/// Maximum page size.
pub const MAX_LIMIT: u32 = 30;

/// Validated page/limit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u32,
    /// Number of points per page.
    pub limit: u32,
}

impl PageRequest {
    /// Build a page request, rejecting `page < 1` and limits outside `1..=30`.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Result<Self, AppError> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        if page < 1 {
            return Err(AppError::validation("page must be at least 1"));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(AppError::validation(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }

        Ok(Self { page, limit })
    }

    /// SQL `OFFSET` value.
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    /// SQL `LIMIT` value.
    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Optional inclusive window applied to reception timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Lower bound, inclusive.
    pub start: Option<DateTime<Utc>>,
    /// Upper bound, inclusive.
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Build a window, rejecting an end that precedes the start.
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Result<Self, AppError> {
        if let (Some(s), Some(e)) = (start, end)
            && e < s
        {
            return Err(AppError::validation("endDate must not precede startDate"));
        }
        Ok(Self { start, end })
    }

    /// Whether either bound is set.
    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}
