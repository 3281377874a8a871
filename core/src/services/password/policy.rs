//! Password complexity policy

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AuthError, DomainError};

/// Allowed alphabet, at least 8 characters
static PASSWORD_ALPHABET_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z\d@$!%*#?&]{8,}$").unwrap()
});

const SPECIAL_CHARACTERS: &str = "@$!%*#?&";

/// Checks a candidate password against the complexity policy
///
/// At least 8 characters drawn from letters, digits and `@$!%*#?&`,
/// containing at least one of each class.
///
/// # Returns
/// * `Ok(())` - Password is acceptable
/// * `Err(DomainError::Auth(AuthError::WeakPassword))` - Policy violated
pub fn validate_password_strength(password: &str) -> Result<(), DomainError> {
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| SPECIAL_CHARACTERS.contains(c));

    if PASSWORD_ALPHABET_REGEX.is_match(password) && has_letter && has_digit && has_special {
        Ok(())
    } else {
        Err(DomainError::Auth(AuthError::WeakPassword))
    }
}
