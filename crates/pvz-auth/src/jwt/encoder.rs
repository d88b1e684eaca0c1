//! Token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use pvz_core::config::AuthConfig;
use pvz_core::error::AppError;
use pvz_core::types::UserId;
use pvz_entity::user::UserRole;

use super::claims::{Claims, ISSUER};

/// Creates signed HS256 session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::hours(i64::try_from(config.token_ttl_hours).unwrap_or(24)),
        }
    }

    /// Signs a token for `user_id` with `role`, valid for the configured TTL.
    pub fn encode(
        &self,
        user_id: UserId,
        role: UserRole,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        self.encode_at(user_id, role, now, now + self.ttl)
    }

    pub(crate) fn encode_at(
        &self,
        user_id: UserId,
        role: UserRole,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let claims = Claims {
            sub: user_id,
            role,
            iss: ISSUER.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok((token, expires_at))
    }
}
