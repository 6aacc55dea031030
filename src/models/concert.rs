use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Концерт с конечным количеством билетов.
/// `sold_tickets` меняется только транзакцией бронирования.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Concert {
    pub id: i64,
    pub concert_name: String,
    pub venue: Option<String>,
    pub concert_date: DateTime<Utc>,
    pub total_tickets: i32,
    pub sold_tickets: i32,
}

impl Concert {
    pub fn available_tickets(&self) -> i32 {
        self.total_tickets - self.sold_tickets
    }
}

// Строка для списков: available_tickets считается в SQL
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ConcertSummary {
    pub id: i64,
    pub concert_name: String,
    pub venue: Option<String>,
    pub concert_date: DateTime<Utc>,
    pub total_tickets: i32,
    pub sold_tickets: i32,
    pub available_tickets: i32,
}
