use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::{Car, NewCar};
use crate::utils::errors::AppResult;

/// Acceso a la tabla `cars`
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Todos los coches, los más recientes primero
    async fn list_all(&self) -> AppResult<Vec<Car>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Car>>;

    /// Coches con `available = TRUE` cuyo nombre o modelo contiene `query`, del más barato al más caro
    async fn search(&self, query: &str) -> AppResult<Vec<Car>>;

    async fn create(&self, car: NewCar) -> AppResult<Car>;

    /// Reemplazo completo; `None` si no existe
    async fn update(&self, id: i64, car: NewCar) -> AppResult<Option<Car>>;

    async fn delete(&self, id: i64) -> AppResult<bool>;

    async fn set_image_url(&self, id: i64, image_url: &str) -> AppResult<bool>;
}

pub struct PgCarRepository {
    pool: PgPool,
}

impl PgCarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapar los comodines de LIKE en una búsqueda de texto libre
pub(crate) fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl CarRepository for PgCarRepository {
    async fn list_all(&self) -> AppResult<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>("SELECT * FROM cars ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(cars)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Car>> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(car)
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(
            r#"
            SELECT * FROM cars
            WHERE available = TRUE AND (name ILIKE $1 OR model ILIKE $1)
            ORDER BY price_per_day ASC, id ASC
            "#,
        )
        .bind(like_pattern(query))
        .fetch_all(&self.pool)
        .await?;
        Ok(cars)
    }

    async fn create(&self, car: NewCar) -> AppResult<Car> {
        let created = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (
                name, model, year, price_per_day, whatsapp_number, images, description,
                location, seats, doors, transmission, available, start_date, end_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(&car.name)
        .bind(&car.model)
        .bind(car.year)
        .bind(car.price_per_day)
        .bind(&car.whatsapp_number)
        .bind(Json(&car.images))
        .bind(&car.description)
        .bind(&car.location)
        .bind(car.seats)
        .bind(car.doors)
        .bind(&car.transmission)
        .bind(car.available)
        .bind(car.start_date)
        .bind(car.end_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, id: i64, car: NewCar) -> AppResult<Option<Car>> {
        let updated = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET name = $2, model = $3, year = $4, price_per_day = $5, whatsapp_number = $6,
                images = $7, description = $8, location = $9, seats = $10, doors = $11,
                transmission = $12, available = $13, start_date = $14, end_date = $15
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&car.name)
        .bind(&car.model)
        .bind(car.year)
        .bind(car.price_per_day)
        .bind(&car.whatsapp_number)
        .bind(Json(&car.images))
        .bind(&car.description)
        .bind(&car.location)
        .bind(car.seats)
        .bind(car.doors)
        .bind(&car.transmission)
        .bind(car.available)
        .bind(car.start_date)
        .bind(car.end_date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_image_url(&self, id: i64, image_url: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE cars SET image_url = $1 WHERE id = $2")
            .bind(image_url)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rav"), "%rav%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
