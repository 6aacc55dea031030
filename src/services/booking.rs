//! booking.rs
//!
//! Транзакция бронирования билетов.
//!
//! Вся разделяемая изменяемая информация (счетчик `sold_tickets`) живет в
//! PostgreSQL. Конкурентные попытки на один концерт сериализуются блокировкой
//! строки `SELECT ... FOR UPDATE`; попытки на разные концерты друг друга не ждут.
//! Внутрипроцессных мьютексов и повторов здесь нет: несколько экземпляров
//! сервиса могут работать с одной базой одновременно.

use sqlx::{Postgres, Transaction};
use tracing::{info, instrument, warn};

use crate::database::Database;
use crate::error::BookingError;
use crate::models::{Booking, Concert, NewBooking};

#[derive(Clone)]
pub struct BookingService {
    db: Database,
    max_per_booking: Option<u32>,
}

impl BookingService {
    pub fn new(db: Database, max_per_booking: Option<u32>) -> Self {
        Self { db, max_per_booking }
    }

    /// Атомарно продает `quantity` билетов на концерт либо не меняет ничего.
    ///
    /// Соединение берется из пула на время одной попытки и возвращается на
    /// любом пути выхода. Если коммит не состоялся, перед возвратом соединения
    /// выполняется `ROLLBACK`. Если future бронирования будет брошен до
    /// коммита (клиент отключился), guard транзакции sqlx поставит откат в
    /// очередь соединения при drop, так что промежуточное состояние никому не видно.
    #[instrument(
        name = "book",
        skip(self, request),
        fields(concert_id = request.concert_id, quantity = request.quantity)
    )]
    pub async fn book(&self, request: &NewBooking) -> Result<Booking, BookingError> {
        self.check_request(request)?;

        let mut tx = self.db.pool.begin().await?;

        match Self::book_in_tx(&mut tx, request).await {
            Ok(booking) => {
                tx.commit().await?;
                info!(booking_id = booking.id, "booking committed");
                Ok(booking)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "rollback after failed booking did not complete");
                }
                match &e {
                    BookingError::TransientStoreFailure(_) => {}
                    other => info!(reason = %other, "booking rejected"),
                }
                Err(e)
            }
        }
    }

    // Проверки, не требующие обращения к базе
    fn check_request(&self, request: &NewBooking) -> Result<(), BookingError> {
        if request.quantity < 1 {
            return Err(BookingError::InvalidRequest(
                "quantity must be a positive integer".to_string(),
            ));
        }
        if let Some(max) = self.max_per_booking {
            if i64::from(request.quantity) > i64::from(max) {
                return Err(BookingError::QuantityLimitExceeded {
                    requested: request.quantity,
                    max,
                });
            }
        }
        Ok(())
    }

    async fn book_in_tx(
        tx: &mut Transaction<'static, Postgres>,
        request: &NewBooking,
    ) -> Result<Booking, BookingError> {
        // 1) Блокируем строку концерта до конца транзакции
        let concert = sqlx::query_as::<_, Concert>(
            "SELECT id, concert_name, venue, concert_date, total_tickets, sold_tickets
             FROM concerts WHERE id = $1 FOR UPDATE",
        )
        .bind(request.concert_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(BookingError::NotFound {
            concert_id: request.concert_id,
        })?;

        // 2) Свежая доступность под блокировкой
        ensure_available(&concert, request.quantity)?;

        // 3) Условный инкремент: CHECK в схеме и условие WHERE держат инвариант
        //    sold_tickets <= total_tickets даже при обходе блокировки
        let updated = sqlx::query(
            "UPDATE concerts
             SET sold_tickets = sold_tickets + $1
             WHERE id = $2 AND sold_tickets + $1 <= total_tickets",
        )
        .bind(request.quantity)
        .bind(request.concert_id)
        .execute(&mut **tx)
        .await?;

        if updated.rows_affected() != 1 {
            return Err(BookingError::InsufficientInventory {
                requested: request.quantity,
                available: concert.available_tickets(),
            });
        }

        // 4) Запись брони с серверным временем
        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (concert_id, customer_name, customer_email, quantity, booking_date)
             VALUES ($1, $2, $3, $4, NOW())
             RETURNING id, concert_id, customer_name, customer_email, quantity, booking_date",
        )
        .bind(request.concert_id)
        .bind(&request.customer_name)
        .bind(&request.customer_email)
        .bind(request.quantity)
        .fetch_one(&mut **tx)
        .await?;

        Ok(booking)
    }
}

/// Правило доступности: продать можно не больше `total - sold`.
pub fn ensure_available(concert: &Concert, requested: i32) -> Result<(), BookingError> {
    let available = concert.available_tickets();
    if requested > available {
        return Err(BookingError::InsufficientInventory { requested, available });
    }
    Ok(())
}
