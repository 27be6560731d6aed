//! Modelo de Car
//!
//! Este módulo contiene el struct Car y su variante de escritura.
//! Mapea exactamente a la tabla `cars`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::services::availability_service::AvailabilityState;

/// Car principal - mapea exactamente a la tabla cars
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Car {
    pub id: i64,
    pub name: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: Decimal,
    pub whatsapp_number: String,
    #[sqlx(json)]
    pub images: Vec<String>,
    pub image_url: Option<String>,
    pub description: String,
    pub location: Option<String>,
    pub seats: i32,
    pub doors: i32,
    pub transmission: String,
    pub available: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Datos ya validados para insertar o reemplazar un coche
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    pub name: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: Decimal,
    pub whatsapp_number: String,
    pub images: Vec<String>,
    pub description: String,
    pub location: Option<String>,
    pub seats: i32,
    pub doors: i32,
    pub transmission: String,
    pub available: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Car {
    /// Estado de disponibilidad de la fila
    pub fn availability_state(&self) -> AvailabilityState {
        AvailabilityState {
            available: self.available,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    /// Imágenes a mostrar: la galería, o la foto subida si no hay galería
    pub fn gallery(&self) -> Vec<String> {
        if !self.images.is_empty() {
            return self.images.clone();
        }
        self.image_url.iter().cloned().collect()
    }

    /// Construir la fila resultante de aplicar `NewCar` (usado por el almacén en memoria)
    pub fn from_new(id: i64, new: NewCar, image_url: Option<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            model: new.model,
            year: new.year,
            price_per_day: new.price_per_day,
            whatsapp_number: new.whatsapp_number,
            images: new.images,
            image_url,
            description: new.description,
            location: new.location,
            seats: new.seats,
            doors: new.doors,
            transmission: new.transmission,
            available: new.available,
            start_date: new.start_date,
            end_date: new.end_date,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewCar {
        NewCar {
            name: "Toyota".to_string(),
            model: "RAV4".to_string(),
            year: 2022,
            price_per_day: Decimal::new(45_000, 0),
            whatsapp_number: "+250788123456".to_string(),
            images: Vec::new(),
            description: String::new(),
            location: None,
            seats: 5,
            doors: 4,
            transmission: "Automatic".to_string(),
            available: true,
            start_date: None,
            end_date: None,
        }
    }

    #[test]
    fn test_gallery_prefers_images() {
        let mut new = sample();
        new.images = vec!["/a.jpg".to_string()];
        let car = Car::from_new(1, new, Some("/uploads/cars/x.jpg".to_string()), Utc::now());
        assert_eq!(car.gallery(), vec!["/a.jpg"]);
    }

    #[test]
    fn test_gallery_falls_back_to_image_url() {
        let car = Car::from_new(1, sample(), Some("/uploads/cars/x.jpg".to_string()), Utc::now());
        assert_eq!(car.gallery(), vec!["/uploads/cars/x.jpg"]);

        let bare = Car::from_new(2, sample(), None, Utc::now());
        assert!(bare.gallery().is_empty());
    }
}
