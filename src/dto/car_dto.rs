use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::{Car, NewCar};
use crate::services::availability_service::{self, AvailabilityView};
use crate::utils::errors::{validation_error, AppError, AppResult};
use crate::utils::validation::{
    deserialize_images, deserialize_loose_bool, deserialize_loose_number, parse_optional_date,
    validate_not_empty, validate_phone,
};

fn default_seats() -> i32 {
    5
}

fn default_doors() -> i32 {
    4
}

fn default_available() -> bool {
    true
}

// Request del panel para crear o reemplazar un coche
#[derive(Debug, Deserialize, Validate)]
pub struct CarPayload {
    #[validate(custom = "validate_not_empty")]
    pub name: String,

    #[validate(custom = "validate_not_empty")]
    pub model: String,

    #[serde(deserialize_with = "deserialize_loose_number")]
    #[validate(range(min = 1950, max = 2100))]
    pub year: i32,

    #[serde(deserialize_with = "deserialize_loose_number")]
    pub price_per_day: Decimal,

    #[validate(custom = "validate_phone")]
    pub whatsapp_number: String,

    #[serde(default, deserialize_with = "deserialize_images")]
    pub images: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default = "default_seats", deserialize_with = "deserialize_loose_number")]
    #[validate(range(min = 1, max = 60))]
    pub seats: i32,

    #[serde(default = "default_doors", deserialize_with = "deserialize_loose_number")]
    #[validate(range(min = 1, max = 8))]
    pub doors: i32,

    #[serde(default)]
    pub transmission: Option<String>,

    #[serde(default = "default_available", deserialize_with = "deserialize_loose_bool")]
    pub available: bool,

    #[serde(default)]
    pub start_date: Option<String>,

    #[serde(default)]
    pub end_date: Option<String>,
}

fn date_field(field: &'static str, value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    parse_optional_date(value).map_err(|e| {
        let mut errors = ValidationErrors::new();
        errors.add(field, e);
        AppError::Validation(errors)
    })
}

impl CarPayload {
    /// Validar el formulario y normalizarlo a una fila escribible
    pub fn into_new_car(self) -> AppResult<NewCar> {
        self.validate()?;

        if self.price_per_day.is_sign_negative() {
            return Err(validation_error("price_per_day", "Price per day cannot be negative"));
        }

        let start_date = date_field("start_date", self.start_date.as_deref())?;
        let end_date = date_field("end_date", self.end_date.as_deref())?;

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(validation_error(
                    "end_date",
                    "End date must be on or after the start date",
                ));
            }
        }

        let transmission = self
            .transmission
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Automatic".to_string());

        Ok(NewCar {
            name: self.name.trim().to_string(),
            model: self.model.trim().to_string(),
            year: self.year,
            price_per_day: self.price_per_day,
            whatsapp_number: self.whatsapp_number.trim().to_string(),
            images: self.images,
            description: self.description.unwrap_or_default(),
            location: self.location.filter(|l| !l.trim().is_empty()),
            seats: self.seats,
            doors: self.doors,
            transmission,
            available: self.available,
            start_date,
            end_date,
        })
    }
}

// Response de coche: la fila, su galería y la disponibilidad para la fecha consultada
#[derive(Debug, Serialize)]
pub struct CarResponse {
    #[serde(flatten)]
    pub car: Car,
    pub gallery: Vec<String>,
    pub availability: AvailabilityView,
}

impl CarResponse {
    pub fn new(car: Car, query_date: NaiveDate) -> Self {
        let availability = availability_service::resolve(&car.availability_state(), query_date);
        Self {
            gallery: car.gallery(),
            car,
            availability,
        }
    }
}

// Filtros del listado público (`GET /api/cars`)
#[derive(Debug, Default, Deserialize)]
pub struct CarFilters {
    pub date: Option<String>,
    /// Alias de `date` usado por el frontend
    pub start_date: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub seats: Option<i32>,
    pub transmission: Option<String>,
    pub q: Option<String>,
    #[serde(default)]
    pub bookable: bool,
}

impl CarFilters {
    /// Fecha pedida por el cliente, si la hay
    pub fn query_date(&self) -> AppResult<Option<NaiveDate>> {
        let raw = self.date.as_deref().or(self.start_date.as_deref());
        date_field("date", raw)
    }

    pub fn matches(&self, listing: &CarResponse) -> bool {
        let car = &listing.car;

        if self.min_price.is_some_and(|min| car.price_per_day < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| car.price_per_day > max) {
            return false;
        }
        if self.seats.is_some_and(|seats| car.seats != seats) {
            return false;
        }
        if let Some(transmission) = self.transmission.as_deref().map(str::trim) {
            if !transmission.is_empty() && !car.transmission.eq_ignore_ascii_case(transmission) {
                return false;
            }
        }
        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let q = q.to_lowercase();
            let hit = [&car.name, &car.model, &car.description]
                .iter()
                .any(|field| field.to_lowercase().contains(&q));
            if !hit {
                return false;
            }
        }
        !self.bookable || listing.availability.can_book
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> CarPayload {
        serde_json::from_value(value).unwrap()
    }

    fn base() -> serde_json::Value {
        json!({
            "name": "Toyota",
            "model": "RAV4",
            "year": 2022,
            "price_per_day": 45000,
            "whatsapp_number": "+250 788 123 456"
        })
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let car = payload(base()).into_new_car().unwrap();
        assert!(car.available);
        assert_eq!(car.seats, 5);
        assert_eq!(car.doors, 4);
        assert_eq!(car.transmission, "Automatic");
        assert_eq!(car.description, "");
        assert!(car.images.is_empty());
        assert_eq!(car.start_date, None);
    }

    #[test]
    fn test_form_values_normalized() {
        let mut value = base();
        value["available"] = json!("0");
        value["year"] = json!("2021");
        value["price_per_day"] = json!("38000.50");
        value["images"] = json!("/a.jpg, /b.jpg");
        value["start_date"] = json!("");
        value["end_date"] = json!("2025-03-01");

        let car = payload(value).into_new_car().unwrap();
        assert!(!car.available);
        assert_eq!(car.year, 2021);
        assert_eq!(car.price_per_day, Decimal::new(3_800_050, 2));
        assert_eq!(car.images, vec!["/a.jpg", "/b.jpg"]);
        assert_eq!(car.start_date, None);
        assert_eq!(car.end_date, Some(ymd(2025, 3, 1)));
    }

    #[test]
    fn test_rejects_inverted_window() {
        let mut value = base();
        value["start_date"] = json!("2025-03-10");
        value["end_date"] = json!("2025-03-01");

        let err = payload(value).into_new_car().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_rejects_malformed_date() {
        let mut value = base();
        value["start_date"] = json!("10/03/2025");
        assert!(matches!(
            payload(value).into_new_car(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_fields() {
        let mut value = base();
        value["name"] = json!("   ");
        assert!(payload(value).into_new_car().is_err());

        let mut value = base();
        value["whatsapp_number"] = json!("123");
        assert!(payload(value).into_new_car().is_err());

        let mut value = base();
        value["price_per_day"] = json!(-1);
        assert!(payload(value).into_new_car().is_err());

        let mut value = base();
        value["seats"] = json!(0);
        assert!(payload(value).into_new_car().is_err());
    }

    fn listing(price: i64, seats: i32, transmission: &str, available: bool) -> CarResponse {
        let new = NewCar {
            name: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2022,
            price_per_day: Decimal::new(price, 0),
            whatsapp_number: "250788123456".to_string(),
            images: Vec::new(),
            description: "Fuel efficient sedan".to_string(),
            location: None,
            seats,
            doors: 4,
            transmission: transmission.to_string(),
            available,
            start_date: None,
            end_date: None,
        };
        CarResponse::new(Car::from_new(1, new, None, Utc::now()), ymd(2025, 1, 1))
    }

    #[test]
    fn test_filters() {
        let car = listing(45_000, 5, "Automatic", false);

        assert!(CarFilters::default().matches(&car));
        assert!(!CarFilters { min_price: Some(Decimal::new(50_000, 0)), ..Default::default() }.matches(&car));
        assert!(CarFilters { max_price: Some(Decimal::new(45_000, 0)), ..Default::default() }.matches(&car));
        assert!(!CarFilters { seats: Some(7), ..Default::default() }.matches(&car));
        assert!(CarFilters { transmission: Some("automatic".into()), ..Default::default() }.matches(&car));
        assert!(CarFilters { q: Some("SEDAN".into()), ..Default::default() }.matches(&car));
        assert!(!CarFilters { q: Some("hilux".into()), ..Default::default() }.matches(&car));
        assert!(!CarFilters { bookable: true, ..Default::default() }.matches(&car));
    }

    #[test]
    fn test_query_date_alias() {
        let filters = CarFilters {
            start_date: Some("2025-06-01".into()),
            ..Default::default()
        };
        assert_eq!(filters.query_date().unwrap(), Some(ymd(2025, 6, 1)));

        let bad = CarFilters {
            date: Some("tomorrow".into()),
            ..Default::default()
        };
        assert!(bad.query_date().is_err());
    }

    #[test]
    fn test_response_shape() {
        let value = serde_json::to_value(listing(45_000, 5, "Automatic", false)).unwrap();
        assert_eq!(value["name"], "Toyota");
        assert_eq!(value["availability"]["canBook"], false);
        assert_eq!(value["availability"]["reasonText"], "Booked");
        assert!(value["gallery"].as_array().unwrap().is_empty());
    }
}
