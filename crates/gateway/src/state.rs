//! Shared application state for the gateway

use sqlx::SqlitePool;
use std::sync::Arc;
use waypost_opaque_id::OpaqueIdCodec;
use waypost_users::{UserRepository, UserService};

/// Shared application state containing all services
#[derive(Clone)]
pub struct GatewayState {
    /// Database connection pool
    pub pool: SqlitePool,
    /// User service
    pub user_service: Arc<UserService<UserRepository>>,
}

impl GatewayState {
    /// Create a new gateway state with all services initialized.
    ///
    /// The codec arrives fully constructed: configuration validation has
    /// already happened at startup.
    pub fn new(pool: SqlitePool, codec: OpaqueIdCodec) -> Self {
        let user_service = Arc::new(UserService::new(pool.clone(), codec));

        Self { pool, user_service }
    }

    /// Get a user service reference
    pub fn user_service(&self) -> &UserService<UserRepository> {
        &self.user_service
    }
}
