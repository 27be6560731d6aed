use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Driver, DriverStatus, NewDriver};
use crate::utils::errors::AppResult;

/// Acceso a la tabla `drivers`
#[async_trait]
pub trait DriverRepository: Send + Sync {
    async fn list_all(&self) -> AppResult<Vec<Driver>>;

    /// Conductores con estado `available`, por nombre
    async fn list_available(&self) -> AppResult<Vec<Driver>>;

    async fn create(&self, driver: NewDriver) -> AppResult<Driver>;

    async fn update(&self, id: i64, driver: NewDriver) -> AppResult<Option<Driver>>;

    async fn delete(&self, id: i64) -> AppResult<bool>;

    async fn set_photo_url(&self, id: i64, photo_url: &str) -> AppResult<bool>;
}

pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DriverRepository for PgDriverRepository {
    async fn list_all(&self) -> AppResult<Vec<Driver>> {
        let drivers =
            sqlx::query_as::<_, Driver>("SELECT * FROM drivers ORDER BY created_at DESC, id DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(drivers)
    }

    async fn list_available(&self) -> AppResult<Vec<Driver>> {
        let drivers =
            sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE status = $1 ORDER BY name")
                .bind(DriverStatus::Available.as_str())
                .fetch_all(&self.pool)
                .await?;
        Ok(drivers)
    }

    async fn create(&self, driver: NewDriver) -> AppResult<Driver> {
        let created = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (name, phone, email, license_number, vehicle_assigned, status, photo_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&driver.name)
        .bind(&driver.phone)
        .bind(&driver.email)
        .bind(&driver.license_number)
        .bind(&driver.vehicle_assigned)
        .bind(driver.status.as_str())
        .bind(&driver.photo_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, id: i64, driver: NewDriver) -> AppResult<Option<Driver>> {
        // photo_url solo se pisa si el formulario trae una
        let updated = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET name = $2, phone = $3, email = $4, license_number = $5,
                vehicle_assigned = $6, status = $7, photo_url = COALESCE($8, photo_url)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&driver.name)
        .bind(&driver.phone)
        .bind(&driver.email)
        .bind(&driver.license_number)
        .bind(&driver.vehicle_assigned)
        .bind(driver.status.as_str())
        .bind(&driver.photo_url)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_photo_url(&self, id: i64, photo_url: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE drivers SET photo_url = $1 WHERE id = $2")
            .bind(photo_url)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
