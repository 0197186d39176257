//! User repository for database operations.

use crate::entities::{NewUser, User};
use crate::types::{UserError, UserResult};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const USER_COLUMNS: &str =
    "id, opaque_id, email, username, display_name, password_hash, created_at, updated_at";

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by primary key
    pub async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.map(|row| Self::map_user(&row)))
    }

    /// Find user by the opaque identifier column (the fast resolve path)
    pub async fn find_by_opaque_id(&self, opaque_id: &str) -> UserResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE opaque_id = ?"
        ))
        .bind(opaque_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.map(|row| Self::map_user(&row)))
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.map(|row| Self::map_user(&row)))
    }

    /// Create new user. The opaque identifier column starts out NULL; it is
    /// populated by `set_opaque_id` right after creation.
    pub async fn create(&self, new_user: &NewUser) -> UserResult<User> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO users (email, username, display_name, password_hash, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)"
        )
        .bind(&new_user.email)
        .bind(&new_user.username)
        .bind(&new_user.display_name)
        .bind(&new_user.password_hash)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let message = e.to_string();
            if message.contains("UNIQUE constraint failed") {
                if message.contains("email") {
                    UserError::EmailAlreadyExists
                } else {
                    UserError::UsernameAlreadyExists
                }
            } else {
                UserError::DatabaseError(message)
            }
        })?;

        let user_id = result.last_insert_rowid();

        self.find_by_id(user_id).await?.ok_or_else(|| {
            UserError::DatabaseError("Failed to retrieve created user".to_string())
        })
    }

    /// Write the opaque identifier for a row whose column is still empty.
    ///
    /// The guard in the WHERE clause makes repeated calls no-ops: the column
    /// is written at most once per row, and a single-row UPDATE is atomic.
    /// Returns the number of rows affected so callers can observe whether
    /// this invocation performed the write.
    pub async fn set_opaque_id(&self, user_id: i64, opaque_id: &str) -> UserResult<u64> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "UPDATE users SET opaque_id = ?, updated_at = ? WHERE id = ? AND (opaque_id IS NULL OR opaque_id = '')"
        )
        .bind(opaque_id)
        .bind(&now)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    fn map_user(row: &SqliteRow) -> User {
        User {
            id: row.get("id"),
            opaque_id: row.get("opaque_id"),
            email: row.get("email"),
            username: row.get("username"),
            display_name: row.get("display_name"),
            password_hash: row.get("password_hash"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_pool() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let config = waypost_config::DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 1,
        };

        let pool = crate::connection::prepare_database(&config).await.unwrap();
        crate::migrations::run_migrations(&pool).await.unwrap();

        (pool, temp_dir)
    }

    fn new_user(email: &str, username: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            username: username.to_string(),
            display_name: Some("Test User".to_string()),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[tokio::test]
    async fn test_user_creation_and_retrieval() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let created = repo
            .create(&new_user("test@example.com", "testuser"))
            .await
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.email, "test@example.com");
        assert_eq!(created.opaque_id, None);

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.username, "testuser");

        let by_email = repo
            .find_by_email("test@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        repo.create(&new_user("dup@example.com", "first"))
            .await
            .unwrap();

        let result = repo.create(&new_user("dup@example.com", "second")).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        repo.create(&new_user("first@example.com", "samename"))
            .await
            .unwrap();

        let result = repo
            .create(&new_user("second@example.com", "samename"))
            .await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists)));
    }

    #[tokio::test]
    async fn test_set_opaque_id_writes_once() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let user = repo
            .create(&new_user("test@example.com", "testuser"))
            .await
            .unwrap();

        let affected = repo.set_opaque_id(user.id, "Wp9eKd3m").await.unwrap();
        assert_eq!(affected, 1);

        // Second write is a no-op thanks to the emptiness guard.
        let affected = repo.set_opaque_id(user.id, "different").await.unwrap();
        assert_eq!(affected, 0);

        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.opaque_id.as_deref(), Some("Wp9eKd3m"));
    }

    #[tokio::test]
    async fn test_find_by_opaque_id() {
        let (pool, _temp_dir) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let user = repo
            .create(&new_user("test@example.com", "testuser"))
            .await
            .unwrap();
        repo.set_opaque_id(user.id, "Wp9eKd3m").await.unwrap();

        let found = repo.find_by_opaque_id("Wp9eKd3m").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);

        assert!(repo.find_by_opaque_id("missing").await.unwrap().is_none());
    }
}
