//! Liveness endpoint

use axum::{extract::State, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::GatewayResult;
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Create health routes
pub fn create_health_routes() -> Router<Arc<GatewayState>> {
    Router::new().route("/health", axum::routing::get(health))
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Backend is healthy", body = HealthResponse),
        (status = 500, description = "Database unreachable")
    )
)]
pub async fn health(State(state): State<Arc<GatewayState>>) -> GatewayResult<Json<HealthResponse>> {
    sqlx::query("SELECT 1").fetch_one(&state.pool).await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}
