//! Resolución de disponibilidad de coches
//!
//! Decide si un coche se puede reservar en una fecha y qué texto mostrar
//! cuando no. Cuando el coche tiene ventana de fechas (`start_date`,
//! `end_date`, ambas inclusivas) la ventana manda sobre el flag
//! `available`; sin ventana, el flag es la única fuente.
//!
//! Todo aquí es puro: sin I/O y sin reloj. "Hoy" llega desde
//! [`Clock`](crate::services::clock::Clock).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::services::clock::Clock;
use crate::utils::validation::{lenient_date, loose_bool};

/// Estado de disponibilidad de un coche (subconjunto de la fila `cars`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityState {
    pub available: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Resultado que consume la capa de presentación
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityView {
    pub can_book: bool,
    pub show_unavailable_overlay: bool,
    pub reason_text: String,
}

impl AvailabilityState {
    pub fn has_date_restrictions(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}

/// ¿Cae `query_date` dentro de la ventana del coche? Sin ventana siempre es `true`.
pub fn is_date_available(state: &AvailabilityState, query_date: NaiveDate) -> bool {
    match (state.start_date, state.end_date) {
        (None, None) => true,
        (Some(start), Some(end)) => query_date >= start && query_date <= end,
        (Some(start), None) => query_date >= start,
        (None, Some(end)) => query_date <= end,
    }
}

/// Texto que explica por qué el coche no se puede reservar
pub fn unavailability_reason(state: &AvailabilityState) -> String {
    match (state.available, state.start_date, state.end_date) {
        (false, None, None) => "Booked".to_string(),
        (_, Some(start), Some(end)) => format!("Available: {} – {}", start, end),
        (_, Some(start), None) => format!("Available from {}", start),
        (_, None, Some(end)) => format!("Available until {}", end),
        (true, None, None) => "Unavailable".to_string(),
    }
}

/// Resolver la disponibilidad de un coche para una fecha dada
pub fn resolve(state: &AvailabilityState, query_date: NaiveDate) -> AvailabilityView {
    let date_available = is_date_available(state, query_date);

    let (can_book, show_unavailable_overlay) = if state.has_date_restrictions() {
        (date_available, !date_available)
    } else {
        (state.available, !state.available)
    };

    AvailabilityView {
        can_book,
        show_unavailable_overlay,
        reason_text: unavailability_reason(state),
    }
}

/// Resolver la disponibilidad para el día de hoy según `clock`.
///
/// API de librería: los controladores ya fijan la fecha de consulta y
/// llaman a [`resolve`] directamente.
pub fn resolve_today(state: &AvailabilityState, clock: &dyn Clock) -> AvailabilityView {
    resolve(state, clock.today())
}

/// Coche tal como llega en JSON desde la API o desde datos antiguos.
///
/// Tolera `available` como `1`/`"true"`/etc. y fechas ilegibles, que se
/// tratan como "sin restricción" (y se registran con `warn`).
///
/// API de librería para registros JSON sin tipar (exportaciones, datos
/// antiguos). El servidor no pasa por aquí: las filas de `cars` llegan con
/// columnas `DATE` y `BOOLEAN` ya tipadas y usan [`Car::availability_state`].
///
/// [`Car::availability_state`]: crate::models::Car::availability_state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityInput(pub AvailabilityState);

impl<'de> Deserialize<'de> for AvailabilityInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let object = value
            .as_object()
            .ok_or_else(|| serde::de::Error::custom("car record must be a JSON object"))?;

        let available = match object.get("available") {
            None | Some(Value::Null) => true,
            Some(raw) => loose_bool(raw).unwrap_or_else(|| {
                tracing::warn!("⚠️ Valor 'available' ilegible: {}, se asume true", raw);
                true
            }),
        };

        Ok(AvailabilityInput(AvailabilityState {
            available,
            start_date: lenient_date("start_date", object.get("start_date")),
            end_date: lenient_date("end_date", object.get("end_date")),
        }))
    }
}

impl From<AvailabilityInput> for AvailabilityState {
    fn from(input: AvailabilityInput) -> Self {
        input.0
    }
}
