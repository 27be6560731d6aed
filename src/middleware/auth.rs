//! Middleware de autenticación JWT
//!
//! Protege las rutas `/api/admin/*`: exige `Authorization: Bearer <jwt>`
//! emitido por `/api/admin/verify` e inyecta los claims en la request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Middleware de autenticación de administrador
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.jwt)?;

    // Inyectar claims en las extensions
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
