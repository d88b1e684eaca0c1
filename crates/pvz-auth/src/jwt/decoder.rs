//! Token verification: signature, issuer and expiry only.
//!
//! Revocation is not checked here; that is the session store's second step.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use pvz_core::config::AuthConfig;
use pvz_core::error::AppError;

use super::claims::{Claims, ISSUER};

/// Message returned for every token rejection, whatever the cause.
pub const INVALID_TOKEN: &str = "Invalid or expired token";

/// Verifies HS256 session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;
        validation.set_issuer(&[ISSUER]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies `token` and returns its claims.
    ///
    /// Malformed, expired and forged tokens all yield the same
    /// authentication error; the cause is only logged.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(reason = ?e.kind(), "Token rejected");
                AppError::authentication(INVALID_TOKEN)
            })
    }
}
