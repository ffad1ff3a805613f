//! Input validation utilities
//!
//! Custom validators plugged into `#[validate(custom(function = ...))]`.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// Telegram-style handle: optional leading `@`, then letters, digits or underscores
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@?[A-Za-z0-9_]+$").expect("valid username regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 ()-]{5,18}[0-9]$").expect("valid phone regex"));

/// Validate username characters (length is checked separately)
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(ValidationError::new("username")
            .with_message("Username can only contain letters, numbers and underscores".into()))
    }
}

/// Validate phone number format
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("Invalid phone number".into()))
    }
}

/// Reject strings that are empty after trimming
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message("Value must not be blank".into()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("@alice_123").is_ok());
        assert!(validate_username("user@name").is_err());
        assert!(validate_username("with space").is_err());
        assert!(validate_username("@").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+7 (999) 123-45-67").is_ok());
        assert!(validate_phone("89991234567").is_ok());
        assert!(validate_phone("phone").is_err());
        assert!(validate_phone("12").is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("team").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }
}
