use super::{error_response, AppState};
use crate::models::presale::PurchaseRecord;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::debug;

const INVALID_PURCHASE: &str = "Invalid purchase data";

pub async fn record_purchase(
    State(service): State<AppState>,
    payload: Result<Json<PurchaseRecord>, JsonRejection>,
) -> Response {
    let Json(purchase) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            debug!("Rejected purchase payload: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, INVALID_PURCHASE);
        }
    };

    match service.record_purchase(purchase) {
        Ok(recorded) => Json(recorded).into_response(),
        Err(e) => {
            debug!("Rejected purchase: {}", e);
            error_response(StatusCode::BAD_REQUEST, INVALID_PURCHASE)
        }
    }
}
