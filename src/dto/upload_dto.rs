use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};

use crate::utils::errors::{bad_request_error, AppError, AppResult};

/// Campo del formulario multipart que trae la foto
pub const PHOTO_FIELD: &str = "photo";

// Foto recibida desde el panel
#[derive(Debug)]
pub struct PhotoUpload {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

impl PhotoUpload {
    /// Leer el campo `photo` del cuerpo multipart
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
        {
            if field.name() != Some(PHOTO_FIELD) {
                continue;
            }
            let file_name = field.file_name().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Could not read uploaded file: {}", e)))?;
            return Ok(Self { file_name, bytes });
        }
        Err(bad_request_error("No file uploaded"))
    }
}

#[async_trait]
impl<S> FromRequest<S> for PhotoUpload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        Self::from_multipart(multipart).await
    }
}
