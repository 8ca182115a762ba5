pub mod api;

use crate::Ctx;
use axum::Router;

/// Mount the full route tree
pub fn mount() -> Router<Ctx> {
    Router::new().nest("/api", api::mount())
}
