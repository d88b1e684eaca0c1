//! Reception lifecycle status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use pvz_core::AppError;

/// Lifecycle state of a reception. `Close` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reception_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReceptionStatus {
    /// Open and accepting products.
    InProgress,
    /// Finalized; its products are immutable.
    Close,
}

impl ReceptionStatus {
    /// Every status.
    pub const ALL: [ReceptionStatus; 2] = [Self::InProgress, Self::Close];

    /// Status as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Close => "close",
        }
    }
}

impl fmt::Display for ReceptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReceptionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Invalid reception status: '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&ReceptionStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!("close".parse::<ReceptionStatus>().unwrap(), ReceptionStatus::Close);
        assert!("closed".parse::<ReceptionStatus>().is_err());
    }
}
