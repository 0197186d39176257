//! Waypost Database Crate
//!
//! This crate provides database functionality for the Waypost backend,
//! including connection management, migrations, and the user repository.

use sqlx::SqlitePool;
use waypost_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

// Re-export repositories
pub use repos::UserRepository;

// Re-export entities
pub use entities::{NewUser, User};

// Re-export types
pub use types::{
    errors::{DatabaseError, UserError},
    DatabaseResult, UserResult,
};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    Ok(pool)
}
