use axum::{
    Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::Serialize;

use crate::{
    ApiResponse, Ctx,
    catalog::{CatalogEntry, Platform},
};

/// Console list response
#[derive(Debug, Serialize)]
pub struct ConsolesResponse {
    pub consoles: Vec<Platform>,
    pub total: usize,
}

/// Game list response
#[derive(Debug, Serialize)]
pub struct GamesResponse {
    pub games: Vec<CatalogEntry>,
    pub total: usize,
}

/// List platforms discovered from the archive root, falling back to the
/// built-in list when the live crawl yields nothing
async fn get_consoles(State(ctx): State<Ctx>) -> ApiResponse<ConsolesResponse> {
    let mut consoles = ctx.catalog.list_platforms().await;
    if consoles.is_empty() {
        consoles = Platform::builtin();
    }

    let total = consoles.len();
    ApiResponse::ok(
        "Consoles retrieved successfully",
        ConsolesResponse { consoles, total },
    )
}

/// List catalog entries for one platform directory. An empty list is a
/// legitimate result; callers decide whether and when to retry.
async fn get_games(
    State(ctx): State<Ctx>,
    Path(console): Path<String>,
) -> ApiResponse<GamesResponse> {
    let games = ctx.catalog.list_titles(&console).await;
    let total = games.len();

    ApiResponse::ok(
        "Games retrieved successfully",
        GamesResponse { games, total },
    )
}

/// Unconditionally clear every cached platform and title list
async fn clear_cache(State(ctx): State<Ctx>) -> ApiResponse<&'static str> {
    ctx.catalog.clear_cache();
    ApiResponse::ok("Catalog cache cleared", "cleared")
}

/// Mount catalog routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/catalog/consoles", get(get_consoles))
        .route("/catalog/games/{console}", get(get_games))
        .route("/catalog/cache/clear", post(clear_cache))
}
