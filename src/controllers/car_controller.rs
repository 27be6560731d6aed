use std::sync::Arc;

use tracing::{info, warn};

use crate::controllers::require_database;
use crate::dto::api_response::{ApiResponse, MutationResponse, DB_OFFLINE_MESSAGE};
use crate::dto::car_dto::{CarFilters, CarPayload, CarResponse};
use crate::dto::upload_dto::PhotoUpload;
use crate::repositories::{CarRepository, DatabaseHealth};
use crate::services::clock::Clock;
use crate::services::upload_service::{UploadKind, UploadService};
use crate::services::whatsapp_service::{self, WhatsappLink};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct CarController {
    repository: Arc<dyn CarRepository>,
    health: Arc<dyn DatabaseHealth>,
    clock: Arc<dyn Clock>,
}

impl CarController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.repos.cars.clone(),
            health: state.repos.health.clone(),
            clock: state.clock.clone(),
        }
    }

    /// Listado público con disponibilidad para la fecha pedida (hoy por defecto)
    pub async fn list_public(&self, filters: CarFilters) -> AppResult<ApiResponse<Vec<CarResponse>>> {
        let query_date = match filters.query_date()? {
            Some(date) => date,
            None => self.clock.today(),
        };

        if !self.health.is_connected().await {
            warn!("⚠️ Listado de coches sin base de datos, se devuelve vacío");
            return Ok(ApiResponse::empty(DB_OFFLINE_MESSAGE));
        }

        let cars: Vec<CarResponse> = self
            .repository
            .list_all()
            .await?
            .into_iter()
            .map(|car| CarResponse::new(car, query_date))
            .filter(|listing| filters.matches(listing))
            .collect();

        Ok(ApiResponse::success(cars))
    }

    pub async fn get_public(&self, id: i64) -> AppResult<ApiResponse<CarResponse>> {
        if !self.health.is_connected().await {
            return Err(not_found_error("Car", id));
        }

        let car = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Car", id))?;

        Ok(ApiResponse::success(CarResponse::new(car, self.clock.today())))
    }

    pub async fn search(&self, query: &str) -> AppResult<ApiResponse<Vec<CarResponse>>> {
        if !self.health.is_connected().await {
            return Ok(ApiResponse::empty(DB_OFFLINE_MESSAGE));
        }

        let today = self.clock.today();
        let cars = self
            .repository
            .search(query)
            .await?
            .into_iter()
            .map(|car| CarResponse::new(car, today))
            .collect();

        Ok(ApiResponse::success(cars))
    }

    pub async fn whatsapp(&self, id: i64) -> AppResult<ApiResponse<WhatsappLink>> {
        if !self.health.is_connected().await {
            return Err(not_found_error("Car", id));
        }

        let car = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Car", id))?;

        let message = whatsapp_service::rental_inquiry(&car.name, &car.model);
        Ok(ApiResponse::success(whatsapp_service::build_link(
            &car.whatsapp_number,
            &message,
        )))
    }

    pub async fn list_admin(&self) -> AppResult<ApiResponse<Vec<CarResponse>>> {
        require_database(self.health.as_ref()).await?;

        let today = self.clock.today();
        let cars = self
            .repository
            .list_all()
            .await?
            .into_iter()
            .map(|car| CarResponse::new(car, today))
            .collect();

        Ok(ApiResponse::success(cars))
    }

    pub async fn create(&self, payload: CarPayload) -> AppResult<MutationResponse> {
        require_database(self.health.as_ref()).await?;

        let new_car = payload.into_new_car()?;
        let car = self.repository.create(new_car).await?;

        info!("🚗 Coche creado: {} {} (id {})", car.name, car.model, car.id);
        Ok(MutationResponse::created("Car added successfully", car.id))
    }

    pub async fn update(&self, id: i64, payload: CarPayload) -> AppResult<MutationResponse> {
        require_database(self.health.as_ref()).await?;

        let new_car = payload.into_new_car()?;
        self.repository
            .update(id, new_car)
            .await?
            .ok_or_else(|| not_found_error("Car", id))?;

        info!("✏️ Coche actualizado: id {}", id);
        Ok(MutationResponse::ok("Car updated successfully"))
    }

    pub async fn delete(&self, id: i64) -> AppResult<MutationResponse> {
        require_database(self.health.as_ref()).await?;

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Car", id));
        }

        info!("🗑️ Coche eliminado: id {}", id);
        Ok(MutationResponse::ok("Car deleted successfully"))
    }

    /// Guardar la foto subida y enlazarla como `image_url`
    pub async fn upload_photo(
        &self,
        uploads: &UploadService,
        id: i64,
        photo: PhotoUpload,
    ) -> AppResult<MutationResponse> {
        require_database(self.health.as_ref()).await?;

        let photo_url = uploads
            .save(UploadKind::Car, photo.file_name.as_deref(), &photo.bytes)
            .await?;

        // Sin fila que la referencie, la foto no se queda en disco
        match self.repository.set_image_url(id, &photo_url).await {
            Ok(true) => Ok(MutationResponse::uploaded("Photo uploaded successfully", photo_url)),
            Ok(false) => {
                uploads.discard(&photo_url).await;
                Err(not_found_error("Car", id))
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
    use crate::services::clock::FixedClock;
    use crate::utils::errors::AppError;
    use axum::body::Bytes;
    use chrono::NaiveDate;

    fn photo() -> PhotoUpload {
        PhotoUpload {
            file_name: Some("front.jpg".to_string()),
            bytes: Bytes::from_static(b"jpeg bytes"),
        }
    }

    fn files_in(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
    }

    #[tokio::test]
    async fn test_upload_photo_removes_file_when_database_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadService::new(dir.path());
        uploads.ensure_dirs().await.unwrap();

        // La comprobación de salud pasa, pero la escritura en `cars` falla
        let broken = Arc::new(InMemoryStore::new());
        broken.set_connected(false);
        let controller = CarController {
            repository: broken,
            health: Arc::new(InMemoryStore::new()),
            clock: Arc::new(FixedClock(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())),
        };

        let err = controller.upload_photo(&uploads, 1, photo()).await.unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(files_in(&dir.path().join("cars")), 0);
    }

    #[tokio::test]
    async fn test_upload_photo_removes_file_for_missing_car() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = UploadService::new(dir.path());
        uploads.ensure_dirs().await.unwrap();

        let store = Arc::new(InMemoryStore::new());
        let controller = CarController {
            repository: store.clone(),
            health: store,
            clock: Arc::new(FixedClock(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())),
        };

        let err = controller.upload_photo(&uploads, 42, photo()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(files_in(&dir.path().join("cars")), 0);
    }
}
