use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::car_controller::CarController;
use crate::dto::api_response::{ApiResponse, MutationResponse};
use crate::dto::car_dto::{CarFilters, CarPayload, CarResponse};
use crate::dto::upload_dto::PhotoUpload;
use crate::services::whatsapp_service::WhatsappLink;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{ApiJson, ApiPath, ApiQuery};

/// Rutas públicas bajo `/api/cars`
pub fn create_car_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars))
        .route("/search/:query", get(search_cars))
        .route("/:id", get(get_car))
        .route("/:id/whatsapp", get(get_whatsapp_link))
}

/// Rutas de administración bajo `/api/admin/cars`
pub fn create_admin_car_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all_cars).post(create_car))
        .route("/:id", put(update_car).delete(delete_car))
        .route("/:id/photo", post(upload_car_photo))
}

async fn list_cars(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<CarFilters>,
) -> Result<Json<ApiResponse<Vec<CarResponse>>>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.list_public(filters).await?;
    Ok(Json(response))
}

async fn get_car(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<CarResponse>>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.get_public(id).await?;
    Ok(Json(response))
}

async fn search_cars(
    State(state): State<AppState>,
    ApiPath(query): ApiPath<String>,
) -> Result<Json<ApiResponse<Vec<CarResponse>>>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.search(&query).await?;
    Ok(Json(response))
}

async fn get_whatsapp_link(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<WhatsappLink>>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.whatsapp(id).await?;
    Ok(Json(response))
}

async fn list_all_cars(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CarResponse>>>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.list_admin().await?;
    Ok(Json(response))
}

async fn create_car(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CarPayload>,
) -> Result<Json<MutationResponse>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_car(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<CarPayload>,
) -> Result<Json<MutationResponse>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_car(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MutationResponse>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn upload_car_photo(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    photo: PhotoUpload,
) -> Result<Json<MutationResponse>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.upload_photo(&state.uploads, id, photo).await?;
    Ok(Json(response))
}
