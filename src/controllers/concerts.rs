use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

use super::bookings::elapsed_ms;
use crate::models::ConcertSummary;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/concerts", get(list_concerts))
        .route("/concerts/{id}", get(get_concert))
}

const CONCERT_COLUMNS: &str = "c.id, c.concert_name, c.venue, c.concert_date, \
     c.total_tickets, c.sold_tickets, (c.total_tickets - c.sold_tickets) AS available_tickets";

// GET /api/concerts
async fn list_concerts(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let started = Instant::now();

    let concerts = sqlx::query_as::<_, ConcertSummary>(&format!(
        "SELECT {} FROM concerts c ORDER BY c.concert_date, c.id",
        CONCERT_COLUMNS
    ))
    .fetch_all(&state.db.pool)
    .await
    .map_err(|e| {
        tracing::error!("list_concerts sql error: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to retrieve concerts" })),
        )
    })?;

    Ok(Json(json!({
        "data": concerts,
        "count": concerts.len(),
        "responseTime": elapsed_ms(started),
    })))
}

// GET /api/concerts/{id}
async fn get_concert(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let started = Instant::now();

    let Path(id) = id.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Invalid concert id: {}", rejection.body_text()) })),
        )
    })?;

    let concert = sqlx::query_as::<_, ConcertSummary>(&format!(
        "SELECT {} FROM concerts c WHERE c.id = $1",
        CONCERT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&state.db.pool)
    .await
    .map_err(|e| {
        tracing::error!("get_concert {} sql error: {:?}", id, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to retrieve concert" })),
        )
    })?
    .ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Concert not found" })),
        )
    })?;

    Ok(Json(json!({
        "data": concert,
        "responseTime": elapsed_ms(started),
    })))
}
