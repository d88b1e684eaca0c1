//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use pvz_entity::user::UserRole;

/// `POST /dummyLogin` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DummyLoginRequest {
    /// Role to embed in the issued token.
    pub role: UserRole,
}

/// `POST /register` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login email.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Plaintext password; minimum length is enforced by the service.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Account role.
    pub role: UserRole,
}

/// `POST /login` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// `POST /pvz` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePointRequest {
    /// City name, Russian or English.
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
}

/// `POST /receptions` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenReceptionRequest {
    /// Point to open the reception at.
    pub pvz_id: String,
}

/// `POST /products` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    /// Product type, Russian or English.
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Product type is required"))]
    pub kind: String,
    /// Point whose open reception receives the product.
    pub pvz_id: String,
}
