use bcrypt::verify;
use tracing::{info, warn};

use crate::dto::api_response::ApiResponse;
use crate::dto::auth_dto::VerifyRequest;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_admin_token, IssuedToken, JwtConfig};

pub struct AuthController {
    password_hash: String,
    jwt: JwtConfig,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            password_hash: state.config.admin_password_hash.clone(),
            jwt: state.jwt.clone(),
        }
    }

    /// Cambiar la contraseña de administrador por un token de sesión
    pub async fn verify(&self, request: VerifyRequest) -> Result<ApiResponse<IssuedToken>, AppError> {
        if request.password.is_empty() {
            return Err(AppError::Unauthorized("Invalid password".to_string()));
        }

        // Verificar contraseña
        let valid = verify(&request.password, &self.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            warn!("🔒 Intento fallido de acceso al panel de administración");
            return Err(AppError::Unauthorized("Invalid password".to_string()));
        }

        let token = generate_admin_token(&self.jwt)?;
        info!("🔑 Sesión de administrador emitida, expira {}", token.expires_at);

        Ok(ApiResponse::success_with_message(
            token,
            "Valid password".to_string(),
        ))
    }
}
