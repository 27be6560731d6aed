use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::term_controller::TermController;
use crate::dto::api_response::{ApiResponse, MutationResponse};
use crate::dto::term_dto::TermPayload;
use crate::models::Term;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{ApiJson, ApiPath};

/// Rutas públicas bajo `/api/terms`
pub fn create_term_router() -> Router<AppState> {
    Router::new().route("/", get(list_terms))
}

/// Rutas de administración bajo `/api/admin/terms`
pub fn create_admin_term_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all_terms).post(create_term))
        .route("/:id", put(update_term).delete(delete_term))
}

async fn list_terms(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Term>>>, AppError> {
    let controller = TermController::new(&state);
    let response = controller.list_public().await?;
    Ok(Json(response))
}

async fn list_all_terms(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Term>>>, AppError> {
    let controller = TermController::new(&state);
    let response = controller.list_admin().await?;
    Ok(Json(response))
}

async fn create_term(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TermPayload>,
) -> Result<Json<MutationResponse>, AppError> {
    let controller = TermController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_term(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<TermPayload>,
) -> Result<Json<MutationResponse>, AppError> {
    let controller = TermController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_term(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MutationResponse>, AppError> {
    let controller = TermController::new(&state);
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
