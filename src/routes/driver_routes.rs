use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::driver_controller::DriverController;
use crate::dto::api_response::{ApiResponse, MutationResponse};
use crate::dto::driver_dto::DriverPayload;
use crate::dto::upload_dto::PhotoUpload;
use crate::models::Driver;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{ApiJson, ApiPath};

/// Rutas públicas bajo `/api/drivers`
pub fn create_driver_router() -> Router<AppState> {
    Router::new().route("/available", get(list_available_drivers))
}

/// Rutas de administración bajo `/api/admin/drivers`
pub fn create_admin_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route("/:id", put(update_driver).delete(delete_driver))
        .route("/:id/photo", post(upload_driver_photo))
}

async fn list_available_drivers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Driver>>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.list_available().await?;
    Ok(Json(response))
}

async fn list_drivers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Driver>>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.list_admin().await?;
    Ok(Json(response))
}

async fn create_driver(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DriverPayload>,
) -> Result<Json<MutationResponse>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_driver(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<DriverPayload>,
) -> Result<Json<MutationResponse>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_driver(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MutationResponse>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn upload_driver_photo(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    photo: PhotoUpload,
) -> Result<Json<MutationResponse>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.upload_photo(&state.uploads, id, photo).await?;
    Ok(Json(response))
}
