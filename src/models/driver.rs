//! Modelo de Driver
//!
//! Mapea la tabla `drivers`. El estado se guarda como texto y se
//! convierte al enum al leer la fila.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Estado del conductor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DriverStatus {
    #[default]
    Available,
    Busy,
    Offline,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Available => "available",
            DriverStatus::Busy => "busy",
            DriverStatus::Offline => "offline",
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for DriverStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(DriverStatus::Available),
            "busy" => Ok(DriverStatus::Busy),
            "offline" => Ok(DriverStatus::Offline),
            other => Err(format!("unknown driver status '{}'", other)),
        }
    }
}

/// Driver principal - mapea exactamente a la tabla drivers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub license_number: String,
    pub vehicle_assigned: String,
    #[sqlx(try_from = "String")]
    pub status: DriverStatus,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Datos ya validados para insertar o reemplazar un conductor
#[derive(Debug, Clone, PartialEq)]
pub struct NewDriver {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub license_number: String,
    pub vehicle_assigned: String,
    pub status: DriverStatus,
    pub photo_url: Option<String>,
}

impl Driver {
    pub fn from_new(id: i64, new: NewDriver, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            phone: new.phone,
            email: new.email,
            license_number: new.license_number,
            vehicle_assigned: new.vehicle_assigned,
            status: new.status,
            photo_url: new.photo_url,
            created_at,
        }
    }
}
