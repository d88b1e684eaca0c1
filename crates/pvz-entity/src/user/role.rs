//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two roles of the service.
///
/// Moderators manage points; employees run the reception workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Registers pick-up points.
    Moderator,
    /// Opens and closes receptions, records products.
    Employee,
}

impl UserRole {
    /// Every role.
    pub const ALL: [UserRole; 2] = [Self::Moderator, Self::Employee];

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Moderator => "moderator",
            Self::Employee => "employee",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = pvz_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "moderator" => Ok(Self::Moderator),
            "employee" => Ok(Self::Employee),
            _ => Err(pvz_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: moderator, employee"
            ))),
        }
    }
}
