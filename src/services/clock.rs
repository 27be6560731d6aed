//! Fuente de "hoy" para la resolución de disponibilidad.
//!
//! El reloj se inyecta en el estado de la aplicación para que los tests
//! puedan fijar la fecha.

use chrono::{Local, NaiveDate};

pub trait Clock: Send + Sync {
    /// Fecha local actual (sin hora)
    fn today(&self) -> NaiveDate;
}

/// Reloj del sistema, en la zona horaria local del proceso
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Reloj con fecha fija
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
