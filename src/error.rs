//! error.rs
//!
//! Таксономия ошибок операции бронирования и их отображение в HTTP.
//!
//! Каждая категория получает собственный статус и машинный код, чтобы клиент
//! мог отличить "концерт не найден" от "не хватает билетов" и от сбоя хранилища,
//! не разбирая текст сообщения.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    /// Запрос не прошел валидацию (пустое имя, неверный email, quantity < 1).
    #[error("invalid booking request: {0}")]
    InvalidRequest(String),

    #[error("requested {requested} tickets, at most {max} allowed per booking")]
    QuantityLimitExceeded { requested: i32, max: u32 },

    #[error("concert {concert_id} not found")]
    NotFound { concert_id: i64 },

    #[error("only {available} tickets available, requested {requested}")]
    InsufficientInventory { requested: i32, available: i32 },

    /// Соединение, блокировка строки или коммит не удались; транзакция откачена.
    #[error("ticket store unavailable: {0}")]
    TransientStoreFailure(#[from] sqlx::Error),
}

impl BookingError {
    pub fn status(&self) -> StatusCode {
        match self {
            BookingError::InvalidRequest(_) | BookingError::QuantityLimitExceeded { .. } => {
                StatusCode::BAD_REQUEST
            }
            BookingError::NotFound { .. } => StatusCode::NOT_FOUND,
            BookingError::InsufficientInventory { .. } => StatusCode::CONFLICT,
            BookingError::TransientStoreFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            BookingError::InvalidRequest(_) => "INVALID_REQUEST",
            BookingError::QuantityLimitExceeded { .. } => "QUANTITY_LIMIT_EXCEEDED",
            BookingError::NotFound { .. } => "CONCERT_NOT_FOUND",
            BookingError::InsufficientInventory { .. } => "INSUFFICIENT_INVENTORY",
            BookingError::TransientStoreFailure(_) => "STORE_UNAVAILABLE",
        }
    }

    fn public_message(&self) -> String {
        match self {
            // Детали ошибки БД наружу не отдаем
            BookingError::TransientStoreFailure(_) => {
                "Booking could not be completed, please retry later".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    available: Option<i32>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorBody,
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        if let BookingError::TransientStoreFailure(source) = &self {
            tracing::error!(code = self.code(), error = %source, "booking failed on store error");
        }

        let available = match &self {
            BookingError::InsufficientInventory { available, .. } => Some(*available),
            _ => None,
        };

        let body = ErrorResponse {
            success: false,
            error: ErrorBody {
                code: self.code(),
                message: self.public_message(),
                available,
            },
        };

        (self.status(), Json(body)).into_response()
    }
}
