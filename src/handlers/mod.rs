// src/handlers/mod.rs

pub mod assessment;
pub mod progress;
pub mod submission;

use crate::error::AppError;

/// Rejects non-positive ids before any lookup happens.
pub(crate) fn require_valid_id(id: i64, what: &str) -> Result<(), AppError> {
    if id <= 0 {
        return Err(AppError::InvalidIdentifier(format!(
            "Invalid {} id: {}",
            what, id
        )));
    }
    Ok(())
}
