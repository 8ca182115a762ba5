use axum::{Router, routing::get};

use crate::{ApiResponse, Ctx};

/// Liveness probe
async fn health() -> ApiResponse<&'static str> {
    ApiResponse::ok("Service is healthy", "ok")
}

/// Mount health routes
pub fn mount() -> Router<Ctx> {
    Router::new().route("/health", get(health))
}
