//! Backend del marketplace de alquiler de coches
//!
//! API HTTP (axum) sobre PostgreSQL: catálogo público de coches con su
//! disponibilidad por fecha, conductores, condiciones de alquiler y un
//! panel de administración protegido con JWT.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::middleware::cors::cors_layer;
use crate::routes::{admin_routes, car_routes, driver_routes, health_routes, term_routes};
use crate::services::upload_service::PUBLIC_PREFIX;
use crate::state::AppState;

/// Construir el router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let uploads = ServeDir::new(state.uploads.root());

    Router::new()
        .nest("/api/health", health_routes::create_health_router())
        .nest("/api/cars", car_routes::create_car_router())
        .nest("/api/drivers", driver_routes::create_driver_router())
        .nest("/api/terms", term_routes::create_term_router())
        .nest("/api/admin", admin_routes::create_admin_router(&state))
        .nest_service(PUBLIC_PREFIX, uploads)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(cors_layer(&state.config.cors_origins))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
