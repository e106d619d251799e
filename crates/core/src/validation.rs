//! Field-level input checks shared by category and card handlers.

use crate::error::CoreError;

/// Maximum length of a category or card name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// Validate a display name: non-blank and at most [`MAX_NAME_LEN`] characters.
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    let len = value.chars().count();
    if len > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters, got {len}"
        )));
    }
    Ok(())
}
