//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pvz_auth::rbac::{Operation, RbacEnforcer};
use pvz_core::error::AppError;
use pvz_core::types::UserId;
use pvz_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built by the HTTP layer from a validated session and passed into every
/// service method so that each operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The role embedded in the session token.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self {
            user_id,
            role,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the caller is a moderator.
    pub fn is_moderator(&self) -> bool {
        matches!(self.role, UserRole::Moderator)
    }

    /// Fails with an authorization error unless the caller's role may
    /// perform `operation`.
    pub fn require(&self, operation: Operation) -> Result<(), AppError> {
        RbacEnforcer::new().require(self.role, operation)
    }
}
