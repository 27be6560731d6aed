//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL (`cars`, `drivers`, `terms`).

pub mod car;
pub mod driver;
pub mod term;

pub use car::{Car, NewCar};
pub use driver::{Driver, DriverStatus, NewDriver};
pub use term::{NewTerm, Term};
