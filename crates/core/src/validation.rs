//! Required-field and format checks shared by every handler.
//!
//! Blank strings count as missing, matching how the forms submit empty inputs.

use validator::ValidateEmail;

use crate::error::CoreError;

/// `true` when the value is present and not just whitespace.
pub fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Fail with a single validation error naming every missing field.
///
/// Each entry is `(field_name, is_present)`.
pub fn require_fields(fields: &[(&'static str, bool)]) -> Result<(), CoreError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Reject syntactically invalid email addresses.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

/// Trim a required string that has already passed [`require_fields`].
pub fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
