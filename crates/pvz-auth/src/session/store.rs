//! Session store over the shared cache.
//!
//! A token is valid only while it is signed, unexpired, and byte-equal to
//! the value cached under its owner's key. Issuing a new token overwrites
//! that value, so each user has at most one valid token at a time.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use pvz_cache::{CacheManager, keys};
use pvz_core::config::AuthConfig;
use pvz_core::error::AppError;
use pvz_core::traits::cache::CacheProvider;
use pvz_core::types::UserId;
use pvz_entity::user::UserRole;

use crate::jwt::decoder::INVALID_TOKEN;
use crate::jwt::{JwtDecoder, JwtEncoder};

/// An authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// The user the token belongs to.
    pub user_id: UserId,
    /// The role embedded in the token.
    pub role: UserRole,
}

/// A freshly issued token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Opaque bearer token.
    pub token: String,
    /// When the token's signature stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Issues, validates and revokes session tokens.
#[derive(Debug, Clone)]
pub struct SessionStore {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    cache: Arc<CacheManager>,
    ttl: Duration,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(config: &AuthConfig, cache: Arc<CacheManager>) -> Self {
        Self {
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            cache,
            ttl: Duration::from_secs(config.token_ttl_hours.saturating_mul(3600)),
        }
    }

    /// Issues a token for `user_id`, replacing any token issued before.
    pub async fn issue(&self, user_id: UserId, role: UserRole) -> Result<IssuedToken, AppError> {
        let (token, expires_at) = self.encoder.encode(user_id, role)?;

        let token_key = keys::session_token(user_id.into_uuid());
        let issued_key = keys::session_issued_at(user_id.into_uuid());
        let issued_at = Utc::now().to_rfc3339();

        self.cache
            .set_many(
                &[(token_key.as_str(), token.as_str()), (issued_key.as_str(), issued_at.as_str())],
                self.ttl,
            )
            .await?;

        debug!(user_id = %user_id, role = %role, "Session issued");
        Ok(IssuedToken { token, expires_at })
    }

    /// Validates `token` and returns the caller it identifies.
    ///
    /// Bad signature, expiry, a missing cache entry and a superseded token
    /// all produce the same authentication error. On success the cache
    /// entries' TTL is extended; failure to do so is logged, not returned.
    pub async fn validate(&self, token: &str) -> Result<Session, AppError> {
        let claims = self.decoder.decode(token)?;
        let user_id = claims.user_id();

        let token_key = keys::session_token(user_id.into_uuid());
        match self.cache.get(&token_key).await? {
            Some(current) if current == token => {}
            Some(_) => {
                debug!(user_id = %user_id, "Superseded token presented");
                return Err(AppError::authentication(INVALID_TOKEN));
            }
            None => {
                debug!(user_id = %user_id, "Token has no live session");
                return Err(AppError::authentication(INVALID_TOKEN));
            }
        }

        let issued_key = keys::session_issued_at(user_id.into_uuid());
        if let Err(e) = self
            .cache
            .expire_many(&[token_key.as_str(), issued_key.as_str()], self.ttl)
            .await
        {
            warn!(user_id = %user_id, error = %e, "Failed to extend session TTL");
        }

        Ok(Session {
            user_id,
            role: claims.role,
        })
    }

    /// Revokes the current token of `user_id`. Revoking a user without a
    /// session succeeds.
    pub async fn revoke(&self, user_id: UserId) -> Result<(), AppError> {
        let token_key = keys::session_token(user_id.into_uuid());
        let issued_key = keys::session_issued_at(user_id.into_uuid());

        self.cache
            .delete_many(&[token_key.as_str(), issued_key.as_str()])
            .await?;

        debug!(user_id = %user_id, "Session revoked");
        Ok(())
    }
}
