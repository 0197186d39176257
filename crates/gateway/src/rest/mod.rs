//! REST API endpoints for the gateway

pub mod health;
pub mod users;

use crate::state::GatewayState;
use axum::Router;
use std::sync::Arc;

/// Create all REST API routes
pub fn create_rest_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .merge(users::create_user_routes())
        .merge(health::create_health_routes())
}
