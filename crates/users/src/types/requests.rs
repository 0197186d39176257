//! Request types for the user domain.

use serde::{Deserialize, Serialize};
use waypost_database::UserError;

use crate::utils::validation;

/// Structured registration command, deserialized from the HTTP payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub username: String,
    pub display_name: Option<String>,
    pub password: String,
}

impl RegisterUserRequest {
    /// Validate the registration command
    pub fn validate(&self) -> Result<(), UserError> {
        validation::validate_email(&self.email)?;
        validation::validate_username(&self.username)?;
        if let Some(ref display_name) = self.display_name {
            validation::validate_display_name(display_name)?;
        }
        validation::validate_password(&self.password)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegisterUserRequest {
        RegisterUserRequest {
            email: "test@example.com".to_string(),
            username: "testuser".to_string(),
            display_name: Some("Test User".to_string()),
            password: "Password123".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let mut request = valid_request();
        request.email = "not-an-email".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_invalid_username_is_rejected() {
        let mut request = valid_request();
        request.username = "a b".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_weak_password_is_rejected() {
        let mut request = valid_request();
        request.password = "short".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_missing_display_name_is_allowed() {
        let mut request = valid_request();
        request.display_name = None;
        assert!(request.validate().is_ok());
    }
}
