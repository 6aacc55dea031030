//! stats.rs
//!
//! Агрегированная статистика по концертам и бронированиям.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/stats", get(get_stats))
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct StatsResponse {
    pub total_concerts: i64,
    pub total_tickets_sold: i64,
    pub total_bookings: i64,
}

/// GET /api/stats
///
/// Каждый агрегат считается отдельным подзапросом: при JOIN с bookings
/// sold_tickets концерта суммировался бы столько раз, сколько у него броней.
async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let stats = sqlx::query_as::<_, StatsResponse>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM concerts) AS total_concerts,
            (SELECT COALESCE(SUM(sold_tickets), 0)::bigint FROM concerts) AS total_tickets_sold,
            (SELECT COUNT(*) FROM bookings) AS total_bookings
        "#,
    )
    .fetch_one(&state.db.pool)
    .await
    .map_err(|e| {
        tracing::error!("get_stats sql error: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to retrieve statistics" })),
        )
    })?;

    tracing::debug!(
        "stats: {} concerts, {} tickets sold, {} bookings",
        stats.total_concerts, stats.total_tickets_sold, stats.total_bookings
    );

    Ok(Json(stats))
}
