use super::AppState;
use crate::models::presale::PresaleSnapshot;
use axum::extract::State;
use axum::http::header::CACHE_CONTROL;
use axum::response::IntoResponse;
use axum::Json;

pub const STATS_CACHE_CONTROL: &str = "public, s-maxage=30, stale-while-revalidate";

pub async fn get_stats(State(service): State<AppState>) -> impl IntoResponse {
    let snapshot: PresaleSnapshot = service.get_snapshot().await;
    ([(CACHE_CONTROL, STATS_CACHE_CONTROL)], Json(snapshot))
}
