use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Application-level error surfaced by API handlers. The catalog and cover
/// cores absorb their own transport failures, so this is reserved for caller
/// mistakes and startup problems.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({
            "code": status.as_u16(),
            "message": self.to_string(),
            "data": null,
        }));

        (status, body).into_response()
    }
}
