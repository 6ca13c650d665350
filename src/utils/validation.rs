// src/utils/validation.rs

use crate::error::AppError;

/// Unwraps a required request field, rejecting the request when it is absent.
pub fn require<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::BadRequest(format!("Missing field: {}", field)))
}
