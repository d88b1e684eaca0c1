//! Convenience result type alias for the PVZ service.

use crate::error::AppError;

/// A specialized `Result` type for PVZ operations.
pub type AppResult<T> = Result<T, AppError>;
