pub mod purchase;
pub mod stats;

use crate::services::presale_service::PresaleService;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;

pub type AppState = Arc<PresaleService>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/presale/stats",
            get(stats::get_stats).fallback(method_not_allowed),
        )
        .route(
            "/api/presale/purchase",
            post(purchase::record_purchase).fallback(method_not_allowed),
        )
        .with_state(state)
}

pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
