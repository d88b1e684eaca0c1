//! Response DTOs.
//!
//! Points, receptions and products are serialized straight from the
//! entity types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pvz_core::types::UserId;
use pvz_entity::user::{User, UserRole};

/// Issued session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token.
    pub token: String,
}

/// Public view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Role.
    pub role: UserRole,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Component status of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` when every component is healthy, otherwise `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `up` or `down`.
    pub database: String,
    /// `up` or `down`.
    pub cache: String,
}
