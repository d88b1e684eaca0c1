//! Session entry points: dummy login, credential login, logout.

use std::sync::Arc;

use tracing::{info, warn};

use pvz_auth::password::PasswordHasher;
use pvz_auth::rbac::{Operation, RbacEnforcer};
use pvz_auth::session::{IssuedToken, SessionStore};
use pvz_core::error::AppError;
use pvz_core::types::UserId;
use pvz_database::repositories::user::UserRepository;
use pvz_entity::user::UserRole;

use crate::context::RequestContext;

const BAD_CREDENTIALS: &str = "Invalid email or password";

/// Issues and revokes sessions.
#[derive(Debug, Clone)]
pub struct SessionService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Session store.
    sessions: Arc<SessionStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
    /// Whether `dummy_login` is served.
    dummy_login_enabled: bool,
}

impl SessionService {
    /// Creates a new session service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        sessions: Arc<SessionStore>,
        hasher: Arc<PasswordHasher>,
        rbac: Arc<RbacEnforcer>,
        dummy_login_enabled: bool,
    ) -> Self {
        Self {
            user_repo,
            sessions,
            hasher,
            rbac,
            dummy_login_enabled,
        }
    }

    /// Issues a session with `role` for a fresh, unregistered identity.
    pub async fn dummy_login(&self, role: UserRole) -> Result<IssuedToken, AppError> {
        if !self.dummy_login_enabled {
            return Err(AppError::authorization("Dummy login is disabled"));
        }

        let user_id = UserId::new();
        let issued = self.sessions.issue(user_id, role).await?;

        info!(user_id = %user_id, role = %role, "Dummy login");
        Ok(issued)
    }

    /// Authenticates with email and password, replacing any previous session.
    ///
    /// An unknown email and a wrong password are reported identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AppError> {
        let email = email.trim().to_lowercase();

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            warn!(email = %email, "Login failed: unknown email");
            return Err(AppError::authentication(BAD_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::authentication(BAD_CREDENTIALS));
        }

        self.sessions.revoke(user.id).await?;
        let issued = self.sessions.issue(user.id, user.role).await?;

        info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(issued)
    }

    /// Revokes the caller's session.
    pub async fn logout(&self, ctx: &RequestContext) -> Result<(), AppError> {
        self.rbac.require(ctx.role, Operation::Logout)?;

        self.sessions.revoke(ctx.user_id).await?;

        info!(user_id = %ctx.user_id, "User logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pvz_cache::CacheManager;
    use pvz_core::config::{AuthConfig, CacheConfig};
    use pvz_core::error::ErrorKind;

    use super::*;
    use crate::test_support::unreachable_pool;

    async fn service(dummy_login_enabled: bool) -> (SessionService, Arc<SessionStore>) {
        let cache = Arc::new(CacheManager::new(&CacheConfig::in_memory()).await.unwrap());
        let sessions = Arc::new(SessionStore::new(&AuthConfig::default(), cache));
        let service = SessionService::new(
            Arc::new(UserRepository::new(unreachable_pool().into_pool())),
            Arc::clone(&sessions),
            Arc::new(PasswordHasher::new()),
            Arc::new(RbacEnforcer::new()),
            dummy_login_enabled,
        );
        (service, sessions)
    }

    #[tokio::test]
    async fn test_dummy_login_then_logout() {
        let (service, sessions) = service(true).await;

        let issued = service.dummy_login(UserRole::Employee).await.unwrap();
        let session = sessions.validate(&issued.token).await.unwrap();
        assert_eq!(session.role, UserRole::Employee);

        let ctx = RequestContext::new(session.user_id, session.role);
        service.logout(&ctx).await.unwrap();

        let err = sessions.validate(&issued.token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_dummy_login_disabled() {
        let (service, _) = service(false).await;
        let err = service.dummy_login(UserRole::Moderator).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
