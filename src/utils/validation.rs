//! Input validation utilities

use crate::error::{AppError, AppResult};

/// Validate the UTF-8 encoded size of submitted code
pub fn validate_code_size(code: &str, limit: usize) -> AppResult<()> {
    let size = code.len();
    if size > limit {
        return Err(AppError::CodeTooLarge { size, limit });
    }
    Ok(())
}
