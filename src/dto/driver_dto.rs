use serde::Deserialize;
use validator::Validate;

use crate::models::{DriverStatus, NewDriver};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{validate_not_empty, validate_optional_email};

// Request del panel para crear o reemplazar un conductor
#[derive(Debug, Deserialize, Validate)]
pub struct DriverPayload {
    #[validate(custom = "validate_not_empty")]
    pub name: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub license_number: Option<String>,

    #[serde(default)]
    pub vehicle_assigned: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub photo_url: Option<String>,
}

impl DriverPayload {
    pub fn into_new_driver(self) -> AppResult<NewDriver> {
        self.validate()?;

        let email = self.email.unwrap_or_default().trim().to_string();
        if let Err(e) = validate_optional_email(&email) {
            let mut errors = validator::ValidationErrors::new();
            errors.add("email", e);
            return Err(errors.into());
        }

        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => DriverStatus::default(),
            Some(raw) => DriverStatus::try_from(raw.to_string()).map_err(|_| {
                validation_error("status", "Status must be available, busy or offline")
            })?,
        };

        Ok(NewDriver {
            name: self.name.trim().to_string(),
            phone: self.phone.unwrap_or_default(),
            email,
            license_number: self.license_number.unwrap_or_default(),
            vehicle_assigned: self.vehicle_assigned.unwrap_or_default(),
            status,
            photo_url: self.photo_url.filter(|p| !p.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_driver() {
        let payload: DriverPayload = serde_json::from_value(json!({ "name": "Jean" })).unwrap();
        let driver = payload.into_new_driver().unwrap();
        assert_eq!(driver.status, DriverStatus::Available);
        assert_eq!(driver.phone, "");
        assert_eq!(driver.photo_url, None);
    }

    #[test]
    fn test_invalid_driver() {
        let payload: DriverPayload =
            serde_json::from_value(json!({ "name": "Jean", "email": "jean-at-mail" })).unwrap();
        assert!(payload.into_new_driver().is_err());

        let payload: DriverPayload = serde_json::from_value(json!({ "name": "" })).unwrap();
        assert!(payload.into_new_driver().is_err());

        let payload: DriverPayload =
            serde_json::from_value(json!({ "name": "Jean", "status": "sleeping" })).unwrap();
        assert!(payload.into_new_driver().is_err());

        let payload: DriverPayload =
            serde_json::from_value(json!({ "name": "Jean", "status": "Busy" })).unwrap();
        assert_eq!(payload.into_new_driver().unwrap().status, DriverStatus::Busy);
    }
}
