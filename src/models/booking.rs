use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Запись о покупке билетов. Создается один раз вместе с инкрементом
/// `concerts.sold_tickets` и больше не меняется.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub concert_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub quantity: i32,
    pub booking_date: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BookingWithConcert {
    pub id: i64,
    pub concert_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub quantity: i32,
    pub booking_date: DateTime<Utc>,
    pub concert_name: String,
    pub concert_date: DateTime<Utc>,
}

/// Входные данные операции бронирования.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub concert_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub quantity: i32,
}
