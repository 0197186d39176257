//! Input validation utilities.

use once_cell::sync::Lazy;
use regex::Regex;
use waypost_database::UserError;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email regex is valid")
});

static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("username regex is valid"));

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), UserError> {
    if email.len() > 255 {
        return Err(UserError::ValidationFailed("Email too long".to_string()));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(UserError::ValidationFailed(
            "Invalid email format".to_string(),
        ));
    }

    Ok(())
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), UserError> {
    if username.len() < 3 {
        return Err(UserError::ValidationFailed(
            "Username must be at least 3 characters long".to_string(),
        ));
    }

    if username.len() > 30 {
        return Err(UserError::ValidationFailed(
            "Username must be less than 30 characters long".to_string(),
        ));
    }

    if !USERNAME_REGEX.is_match(username) {
        return Err(UserError::ValidationFailed(
            "Username can only contain letters, numbers, underscores, and hyphens".to_string(),
        ));
    }

    Ok(())
}

/// Validate display name
pub fn validate_display_name(display_name: &str) -> Result<(), UserError> {
    if display_name.trim().is_empty() {
        return Err(UserError::ValidationFailed(
            "Display name cannot be empty".to_string(),
        ));
    }

    if display_name.len() > 50 {
        return Err(UserError::ValidationFailed(
            "Display name must be less than 50 characters long".to_string(),
        ));
    }

    let disallowed_chars = ['\n', '\r', '\t', '\0'];
    if display_name.chars().any(|c| disallowed_chars.contains(&c)) {
        return Err(UserError::ValidationFailed(
            "Display name contains invalid characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate password strength requirements
pub fn validate_password(password: &str) -> Result<(), UserError> {
    if password.len() < 8 {
        return Err(UserError::ValidationFailed(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    if password.len() > 128 {
        return Err(UserError::ValidationFailed(
            "Password must be less than 128 characters long".to_string(),
        ));
    }

    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !has_lowercase || !has_uppercase || !has_digit {
        return Err(UserError::ValidationFailed(
            "Password must contain lowercase, uppercase, and digit characters".to_string(),
        ));
    }

    Ok(())
}
