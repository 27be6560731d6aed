//! Almacenamiento de fotos subidas desde el panel de administración
//!
//! Los ficheros se guardan en `{upload_dir}/{carpeta}/` y se publican
//! bajo `/uploads/{carpeta}/`.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use uuid::Uuid;

use crate::utils::errors::{bad_request_error, AppError};

/// Prefijo público bajo el que se sirven los ficheros
pub const PUBLIC_PREFIX: &str = "/uploads";

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Carpeta de destino según la entidad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Car,
    Driver,
}

impl UploadKind {
    pub fn folder(&self) -> &'static str {
        match self {
            UploadKind::Car => "cars",
            UploadKind::Driver => "drivers",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadService {
    root: PathBuf,
}

impl UploadService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Crear las carpetas de destino si no existen
    pub async fn ensure_dirs(&self) -> Result<(), AppError> {
        for kind in [UploadKind::Car, UploadKind::Driver] {
            tokio::fs::create_dir_all(self.root.join(kind.folder())).await?;
        }
        Ok(())
    }

    /// Guardar una foto y devolver su URL pública
    pub async fn save(
        &self,
        kind: UploadKind,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        if bytes.is_empty() {
            return Err(bad_request_error("No file uploaded"));
        }

        let extension = image_extension(original_name)?;
        let filename = format!(
            "{}-{}.{}",
            chrono::Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        );

        let dir = self.root.join(kind.folder());
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&filename), bytes).await?;

        info!("📷 Foto guardada: {}/{} ({} bytes)", kind.folder(), filename, bytes.len());
        Ok(format!("{}/{}/{}", PUBLIC_PREFIX, kind.folder(), filename))
    }

    /// Borrar un fichero ya guardado a partir de su URL pública
    pub async fn discard(&self, public_url: &str) {
        let Some(relative) = public_url
            .strip_prefix(PUBLIC_PREFIX)
            .map(|rest| rest.trim_start_matches('/'))
        else {
            return;
        };
        if relative.split('/').any(|part| part == "..") {
            return;
        }
        if let Err(e) = tokio::fs::remove_file(self.root.join(relative)).await {
            warn!("⚠️ No se pudo borrar {}: {}", public_url, e);
        }
    }
}

/// Extensión en minúsculas, solo si es una imagen admitida
fn image_extension(original_name: Option<&str>) -> Result<String, AppError> {
    let extension = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .ok_or_else(|| AppError::BadRequest("Uploaded file must have an extension".to_string()))?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported image type '.{}'",
            extension
        )));
    }
    Ok(extension)
}
