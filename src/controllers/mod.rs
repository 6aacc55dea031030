pub mod bookings;
pub mod concerts;
pub mod health;
pub mod stats;

use axum::Router;
use std::sync::Arc;

// Маршруты под /api
pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(concerts::routes())
        .merge(bookings::routes())
        .merge(stats::routes())
}
