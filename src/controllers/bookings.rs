use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

use crate::error::BookingError;
use crate::models::{Booking, BookingWithConcert, NewBooking};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/book", post(book_tickets))
        .route("/bookings", get(list_bookings))
}

/* ---------- BOOK ---------- */

// POST /api/book
#[derive(Debug, Deserialize, Validate)]
pub struct BookRequest {
    pub concert_id: i64,
    #[validate(length(min = 1, max = 255, message = "customer_name must be 1..255 characters"))]
    pub customer_name: String,
    #[validate(email(message = "customer_email must be a valid e-mail address"))]
    pub customer_email: String,
    #[validate(range(min = 1, message = "quantity must be a positive integer"))]
    pub quantity: i32,
}

impl BookRequest {
    pub fn into_new_booking(mut self) -> Result<NewBooking, BookingError> {
        // пробелы по краям не считаются именем
        self.customer_name = self.customer_name.trim().to_string();
        self.customer_email = self.customer_email.trim().to_string();

        self.validate()
            .map_err(|e| BookingError::InvalidRequest(e.to_string()))?;

        Ok(NewBooking {
            concert_id: self.concert_id,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            quantity: self.quantity,
        })
    }
}

#[derive(Debug, Serialize)]
struct BookResponse {
    success: bool,
    booking: Booking,
    #[serde(rename = "responseTime")]
    response_time: String,
}

async fn book_tickets(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<impl IntoResponse, BookingError> {
    let started = Instant::now();

    // неразборчивое тело - тоже ошибка запроса, в том же JSON-формате
    let Json(req) = payload.map_err(|rejection| BookingError::InvalidRequest(rejection.body_text()))?;

    let new_booking = req.into_new_booking()?;
    let booking = state.bookings.book(&new_booking).await?;

    Ok((
        StatusCode::OK,
        Json(BookResponse {
            success: true,
            booking,
            response_time: elapsed_ms(started),
        }),
    ))
}

/* ---------- LIST ---------- */

// GET /api/bookings
async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let started = Instant::now();

    let rows = sqlx::query_as::<_, BookingWithConcert>(
        r#"
        SELECT b.id, b.concert_id, b.customer_name, b.customer_email, b.quantity, b.booking_date,
               c.concert_name, c.concert_date
        FROM bookings b
        JOIN concerts c ON b.concert_id = c.id
        ORDER BY b.booking_date DESC, b.id DESC
        "#,
    )
    .fetch_all(&state.db.pool)
    .await
    .map_err(|e| {
        tracing::error!("list_bookings sql error: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to retrieve bookings" })),
        )
    })?;

    Ok(Json(json!({
        "data": rows,
        "count": rows.len(),
        "responseTime": elapsed_ms(started),
    })))
}

pub(crate) fn elapsed_ms(started: Instant) -> String {
    format!("{}ms", started.elapsed().as_millis())
}
