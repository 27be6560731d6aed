use std::sync::Arc;

use tracing::info;

use crate::controllers::require_database;
use crate::dto::api_response::{ApiResponse, MutationResponse, DB_OFFLINE_MESSAGE};
use crate::dto::driver_dto::DriverPayload;
use crate::dto::upload_dto::PhotoUpload;
use crate::models::Driver;
use crate::repositories::{DatabaseHealth, DriverRepository};
use crate::services::upload_service::{UploadKind, UploadService};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct DriverController {
    repository: Arc<dyn DriverRepository>,
    health: Arc<dyn DatabaseHealth>,
}

impl DriverController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.repos.drivers.clone(),
            health: state.repos.health.clone(),
        }
    }

    /// Conductores disponibles (ruta pública)
    pub async fn list_available(&self) -> AppResult<ApiResponse<Vec<Driver>>> {
        if !self.health.is_connected().await {
            return Ok(ApiResponse::empty(DB_OFFLINE_MESSAGE));
        }
        Ok(ApiResponse::success(self.repository.list_available().await?))
    }

    pub async fn list_admin(&self) -> AppResult<ApiResponse<Vec<Driver>>> {
        require_database(self.health.as_ref()).await?;
        Ok(ApiResponse::success(self.repository.list_all().await?))
    }

    pub async fn create(&self, payload: DriverPayload) -> AppResult<MutationResponse> {
        require_database(self.health.as_ref()).await?;

        let driver = self.repository.create(payload.into_new_driver()?).await?;

        info!("🧑‍✈️ Conductor creado: {} (id {})", driver.name, driver.id);
        Ok(MutationResponse::created("Driver added successfully", driver.id))
    }

    pub async fn update(&self, id: i64, payload: DriverPayload) -> AppResult<MutationResponse> {
        require_database(self.health.as_ref()).await?;

        self.repository
            .update(id, payload.into_new_driver()?)
            .await?
            .ok_or_else(|| not_found_error("Driver", id))?;

        Ok(MutationResponse::ok("Driver updated successfully"))
    }

    pub async fn delete(&self, id: i64) -> AppResult<MutationResponse> {
        require_database(self.health.as_ref()).await?;

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Driver", id));
        }
        Ok(MutationResponse::ok("Driver deleted successfully"))
    }

    pub async fn upload_photo(
        &self,
        uploads: &UploadService,
        id: i64,
        photo: PhotoUpload,
    ) -> AppResult<MutationResponse> {
        require_database(self.health.as_ref()).await?;

        let photo_url = uploads
            .save(UploadKind::Driver, photo.file_name.as_deref(), &photo.bytes)
            .await?;

        // Sin fila que la referencie, la foto no se queda en disco
        match self.repository.set_photo_url(id, &photo_url).await {
            Ok(true) => Ok(MutationResponse::uploaded("Photo uploaded successfully", photo_url)),
            Ok(false) => {
                uploads.discard(&photo_url).await;
                Err(not_found_error("Driver", id))
            }
            Err(e) => {
                uploads.discard(&photo_url).await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;
    use crate::utils::errors::AppError;
    use axum::body::Bytes;

    #[tokio::test]
    async fn test_upload_photo_removes_file_when_database_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadService::new(dir.path());
        uploads.ensure_dirs().await.unwrap();

        let broken = Arc::new(InMemoryStore::new());
        broken.set_connected(false);
        let controller = DriverController {
            repository: broken,
            health: Arc::new(InMemoryStore::new()),
        };

        let photo = PhotoUpload {
            file_name: Some("portrait.png".to_string()),
            bytes: Bytes::from_static(b"png bytes"),
        };
        let err = controller.upload_photo(&uploads, 1, photo).await.unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        let left = std::fs::read_dir(dir.path().join("drivers")).unwrap().count();
        assert_eq!(left, 0);
    }
}
