pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod models;
pub mod services;

use axum::Router;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use services::booking::BookingService;

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub db: database::Database,
    pub bookings: BookingService,
    pub config: config::Config,
}

impl AppState {
    /// Пул передается явно; сервис бронирования получает его копию (тот же пул).
    pub fn new(db: database::Database, config: config::Config) -> Arc<Self> {
        let bookings = BookingService::new(db.clone(), config.booking.max_tickets_per_booking);
        Arc::new(Self { db, bookings, config })
    }
}

/// Полный HTTP-роутер: API, health check и статика как fallback.
pub fn app(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.app.static_dir);

    Router::new()
        .merge(controllers::health::routes())
        .nest("/api", controllers::routes())
        .fallback_service(static_files)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
