//! Registration input checks.
//!
//! Lengths are counted in characters, not bytes, so multi-byte usernames are
//! measured the way a user would count them.

use crate::error::CoreError;

/// Minimum username length accepted at registration.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.trim().chars().count() < MIN_USERNAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Username must be at least {MIN_USERNAME_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Shallow shape check: non-empty local part and domain around a single `@`.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let valid = match email.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid {
        return Err(CoreError::Validation("Email address is invalid".into()));
    }
    Ok(())
}
