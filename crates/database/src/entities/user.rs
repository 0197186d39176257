use serde::{Deserialize, Serialize};
use waypost_opaque_id::OpaqueKeyed;

/// Represents a user row in the system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Database primary key. Never exposed outside the backend.
    pub id: i64,
    /// Opaque identifier derived from `id`; NULL until materialized,
    /// constant afterwards.
    pub opaque_id: Option<String>,
    /// User email address
    pub email: String,
    /// Unique handle
    pub username: String,
    /// Display name for the user
    pub display_name: Option<String>,
    /// Argon2 PHC hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the user was created (RFC3339)
    pub created_at: String,
    /// When the user was last updated (RFC3339)
    pub updated_at: String,
}

/// Column values for inserting a new user. Built by the registration
/// action after validation and password hashing.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub display_name: Option<String>,
    pub password_hash: String,
}

impl OpaqueKeyed for User {
    fn primary_key(&self) -> u64 {
        // AUTOINCREMENT row ids are positive.
        self.id as u64
    }

    fn stored_opaque_id(&self) -> Option<&str> {
        self.opaque_id.as_deref()
    }
}

impl User {
    /// Get user's display name or fallback
    pub fn display_name_or_fallback(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 3,
            opaque_id: None,
            email: "test@example.com".to_string(),
            username: "testuser".to_string(),
            display_name: Some("Test User".to_string()),
            password_hash: "$argon2id$stub".to_string(),
            created_at: "2024-01-01T10:00:00Z".to_string(),
            updated_at: "2024-01-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_display_name_or_fallback() {
        let mut user = sample_user();
        assert_eq!(user.display_name_or_fallback(), "Test User");

        user.display_name = None;
        assert_eq!(user.display_name_or_fallback(), "testuser");
    }

    #[test]
    fn test_opaque_keyed_accessors() {
        let mut user = sample_user();
        assert_eq!(user.primary_key(), 3);
        assert_eq!(user.stored_opaque_id(), None);

        user.opaque_id = Some("Wp9eKd3m".to_string());
        assert_eq!(user.stored_opaque_id(), Some("Wp9eKd3m"));
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = sample_user();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }
}
