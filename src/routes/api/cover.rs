use axum::{
    Router,
    extract::{Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{ApiResponse, ApiResult, Ctx, error::AppError};

/// Query parameters for cover resolution
#[derive(Debug, Deserialize)]
pub struct CoverQuery {
    /// Display title to resolve
    pub name: Option<String>,
}

/// Resolved cover response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverResponse {
    pub cover_url: String,
}

/// Batch prefetch request
#[derive(Debug, Deserialize)]
pub struct PrefetchRequest {
    pub titles: Vec<String>,
}

/// Resolve one title to a cover image URL. Never fails past this point:
/// no-match and provider failures come back as a placeholder URL.
async fn get_cover(
    State(ctx): State<Ctx>,
    Query(query): Query<CoverQuery>,
) -> ApiResult<CoverResponse> {
    let name = query
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("Game name is required".to_string()))?;

    let cover_url = ctx.covers.resolve(&name).await;

    Ok(ApiResponse::ok(
        "Cover resolved successfully",
        CoverResponse { cover_url },
    ))
}

/// Warm the cover cache for a batch of titles with bounded concurrency
async fn prefetch_covers(
    State(ctx): State<Ctx>,
    axum::Json(request): axum::Json<PrefetchRequest>,
) -> ApiResponse<usize> {
    let total = request.titles.len();
    ctx.covers.prefetch(request.titles).await;

    ApiResponse::ok("Covers prefetched", total)
}

/// Unconditionally clear every cached cover URL
async fn clear_cache(State(ctx): State<Ctx>) -> ApiResponse<&'static str> {
    ctx.covers.clear_cache();
    ApiResponse::ok("Cover cache cleared", "cleared")
}

/// Mount cover routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/cover", get(get_cover))
        .route("/cover/prefetch", post(prefetch_covers))
        .route("/cover/cache/clear", post(clear_cache))
}
