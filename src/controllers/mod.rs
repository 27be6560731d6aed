pub mod auth_controller;
pub mod car_controller;
pub mod driver_controller;
pub mod term_controller;

use crate::dto::api_response::DB_OFFLINE_MESSAGE;
use crate::repositories::DatabaseHealth;
use crate::utils::errors::{AppError, AppResult};

/// Las rutas de administración no tienen respuesta de reserva: sin base de datos, 503
pub(crate) async fn require_database(health: &dyn DatabaseHealth) -> AppResult<()> {
    if health.is_connected().await {
        Ok(())
    } else {
        Err(AppError::ServiceUnavailable(DB_OFFLINE_MESSAGE.to_string()))
    }
}
