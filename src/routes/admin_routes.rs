use axum::{
    extract::State,
    middleware,
    routing::post,
    Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::api_response::ApiResponse;
use crate::dto::auth_dto::VerifyRequest;
use crate::middleware::auth::require_admin;
use crate::middleware::rate_limit::rate_limit_middleware;
use crate::routes::{car_routes, driver_routes, term_routes};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::ApiJson;
use crate::utils::jwt::IssuedToken;

/// Rutas bajo `/api/admin`: `verify` es abierta (con rate limit), el resto exige token
pub fn create_admin_router(state: &AppState) -> Router<AppState> {
    let verify = Router::new()
        .route("/verify", post(verify_password))
        .route_layer(middleware::from_fn_with_state(
            state.rate_limit.clone(),
            rate_limit_middleware,
        ));

    let protected = Router::new()
        .nest("/cars", car_routes::create_admin_car_router())
        .nest("/drivers", driver_routes::create_admin_driver_router())
        .nest("/terms", term_routes::create_admin_term_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new().merge(verify).merge(protected)
}

async fn verify_password(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<VerifyRequest>,
) -> Result<Json<ApiResponse<IssuedToken>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.verify(request).await?;
    Ok(Json(response))
}
