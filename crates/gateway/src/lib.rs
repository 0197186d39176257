//! # Waypost Gateway Crate
//!
//! HTTP layer for the Waypost backend: the axum router, REST endpoints,
//! shared state, and the error-to-status mapping. Every inbound reference
//! to a user travels as an opaque identifier and goes through the user
//! service's resolve step; raw row ids never appear in the API.

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

// Re-export main types for convenience
pub use error::{GatewayError, GatewayResult};
pub use state::GatewayState;

use axum::{http::Method, middleware as axum_middleware, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let arc_state = Arc::new(state);
    let mut router = Router::new()
        .nest("/api", rest::create_rest_routes().with_state(arc_state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    // Serve Swagger UI in debug builds only
    #[cfg(debug_assertions)]
    {
        #[derive(OpenApi)]
        #[openapi(
            paths(
                rest::users::register_user,
                rest::users::get_user,
                rest::health::health,
            ),
            components(
                schemas(
                    rest::users::RegisterRequest,
                    rest::users::UserResponse,
                    rest::users::ErrorResponse,
                    rest::health::HealthResponse,
                )
            ),
            tags(
                (name = "Users", description = "Registration and lookup"),
                (name = "Health", description = "Liveness"),
            )
        )]
        struct ApiDoc;

        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
}
