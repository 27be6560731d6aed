use serde::Deserialize;

// Request de verificación de la contraseña de administrador
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub password: String,
}
