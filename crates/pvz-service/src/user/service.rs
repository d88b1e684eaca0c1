//! User registration.

use std::sync::Arc;

use tracing::info;
use validator::ValidateEmail;

use pvz_auth::password::PasswordHasher;
use pvz_core::error::AppError;
use pvz_database::repositories::user::UserRepository;
use pvz_entity::user::{CreateUser, User, UserRole};

/// Creates accounts for email and password login.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Minimum accepted password length, in characters.
    password_min_length: usize,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        password_min_length: usize,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            password_min_length,
        }
    }

    /// Registers a new user. Emails are compared case-insensitively; a
    /// taken email is a conflict.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        let email = email.trim().to_lowercase();
        if !email.validate_email() {
            return Err(AppError::validation("Invalid email format"));
        }

        if password.chars().count() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                email,
                password_hash,
                role,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }
}
