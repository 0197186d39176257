//! User REST endpoints: registration and lookup by opaque identifier.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::GatewayResult;
use crate::state::GatewayState;
use waypost_users::{RegisterUserRequest, User};

/// Registration payload accepted over HTTP.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub password: String,
}

impl From<RegisterRequest> for RegisterUserRequest {
    fn from(payload: RegisterRequest) -> Self {
        Self {
            email: payload.email,
            username: payload.username,
            display_name: payload.display_name,
            password: payload.password,
        }
    }
}

/// User representation returned to clients.
///
/// `id` carries the opaque identifier; the numeric row id never leaves the
/// backend.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub created_at: String,
}

impl UserResponse {
    fn from_user(user: &User, opaque_id: String) -> Self {
        Self {
            id: opaque_id,
            email: user.email.clone(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            created_at: user.created_at.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Create user routes
pub fn create_user_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/users", axum::routing::post(register_user))
        .route("/users/:opaque_id", axum::routing::get(get_user))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid registration payload", body = ErrorResponse),
        (status = 409, description = "Email or username already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn register_user(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<RegisterRequest>,
) -> GatewayResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .user_service()
        .register(RegisterUserRequest::from(payload))
        .await?;

    let opaque_id = state.user_service().opaque_id_of(&user);
    let response = UserResponse::from_user(&user, opaque_id);
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/users/{opaque_id}",
    tag = "Users",
    params(
        ("opaque_id" = String, Path, description = "Opaque user identifier")
    ),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "No user for this identifier", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<Arc<GatewayState>>,
    Path(opaque_id): Path<String>,
) -> GatewayResult<Json<UserResponse>> {
    // Resolution is an explicit step here: decode, then look the row up.
    // Undecodable identifiers become 404 without a storage query.
    let user = state.user_service().resolve(&opaque_id).await?;

    let opaque_id = state.user_service().opaque_id_of(&user);
    Ok(Json(UserResponse::from_user(&user, opaque_id)))
}
