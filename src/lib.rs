pub mod catalog;
pub mod config;
pub mod cover;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::catalog::{CatalogService, DirectoryScraper, HttpFetcher, NameParser};
use crate::config::AppConfig;
use crate::cover::{CoverResolver, create_default_resolver};
use crate::error::AppError;

/// Shared application state handed to every request handler
#[derive(Clone)]
pub struct Ctx {
    pub catalog: Arc<CatalogService>,
    pub covers: Arc<CoverResolver>,
}

impl Ctx {
    /// Wire up the catalog service and cover resolver from configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout()));
        let scraper =
            DirectoryScraper::new(fetcher, NameParser::new(), config.archive.base_url.as_str());
        let catalog = CatalogService::new(scraper, config.catalog_config());

        let covers = create_default_resolver(
            config.resolver_config(),
            config.covers.rawg_api_key.clone(),
            config.igdb_credentials(),
        );

        Self {
            catalog: Arc::new(catalog),
            covers: Arc::new(covers),
        }
    }
}

/// Uniform API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            code: 200,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// API handler result type
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;
