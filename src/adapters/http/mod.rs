//! HTTP adapters - REST API implementations.
//!
//! - `idea` - Idea, poll, comment and reply endpoints under `/api/ideas`
//! - `middleware` - Bearer token authentication

pub mod idea;
pub mod middleware;

use axum::{middleware as axum_middleware, routing::get, Json, Router};

pub use idea::{idea_routes, IdeaHandlers};
pub use middleware::{auth_middleware, AuthState};

/// Builds the full API router.
///
/// The auth middleware runs on every API route; handlers decide whether a
/// caller is required through the `RequireAuth` extractor.
pub fn api_router(handlers: IdeaHandlers, auth: AuthState) -> Router {
    Router::new()
        .nest("/api/ideas", idea_routes(handlers))
        .layer(axum_middleware::from_fn_with_state(auth, auth_middleware))
        .route("/health", get(health))
}

/// GET /health - Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
