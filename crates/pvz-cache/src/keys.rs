//! Cache key builders for session entries.
//!
//! Keys are relative; the Redis provider adds its configured prefix.

use uuid::Uuid;

/// Key holding the single currently valid token of a user.
pub fn session_token(user_id: Uuid) -> String {
    format!("token:{user_id}")
}

/// Key holding the issuance time of the current token of a user.
pub fn session_issued_at(user_id: Uuid) -> String {
    format!("token:{user_id}:refresh")
}
