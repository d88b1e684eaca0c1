//! RBAC enforcement: turns a policy decision into a result.

use pvz_core::error::AppError;
use pvz_entity::user::UserRole;

use super::policies::{Operation, allowed};

/// Enforces the role policy for service operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RbacEnforcer;

impl RbacEnforcer {
    /// Creates a new enforcer.
    pub fn new() -> Self {
        Self
    }

    /// Returns `Ok(())` if `role` may perform `operation`, otherwise an
    /// authorization error.
    pub fn require(&self, role: UserRole, operation: Operation) -> Result<(), AppError> {
        if allowed(role, operation) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{role}' is not allowed to {}",
                operation.as_str().replace('_', " ")
            )))
        }
    }
}
