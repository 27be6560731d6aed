//! Capa de persistencia
//!
//! Un trait por tabla, con implementación PostgreSQL (`sqlx`) y una
//! implementación en memoria que comparte la misma semántica.

pub mod car_repository;
pub mod driver_repository;
pub mod memory_store;
pub mod term_repository;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

pub use car_repository::{CarRepository, PgCarRepository};
pub use driver_repository::{DriverRepository, PgDriverRepository};
pub use memory_store::InMemoryStore;
pub use term_repository::{PgTermRepository, TermRepository};

/// Comprobación de conectividad con la base de datos
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    async fn is_connected(&self) -> bool;
}

pub struct PgHealth {
    pool: PgPool,
}

#[async_trait]
impl DatabaseHealth for PgHealth {
    async fn is_connected(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("⚠️ Base de datos no disponible: {}", e);
                false
            }
        }
    }
}

/// Conjunto de repositorios que se comparte en el estado de la aplicación
#[derive(Clone)]
pub struct Repositories {
    pub cars: Arc<dyn CarRepository>,
    pub drivers: Arc<dyn DriverRepository>,
    pub terms: Arc<dyn TermRepository>,
    pub health: Arc<dyn DatabaseHealth>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            cars: Arc::new(PgCarRepository::new(pool.clone())),
            drivers: Arc::new(PgDriverRepository::new(pool.clone())),
            terms: Arc::new(PgTermRepository::new(pool.clone())),
            health: Arc::new(PgHealth { pool }),
        }
    }

    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            cars: store.clone(),
            drivers: store.clone(),
            terms: store.clone(),
            health: store,
        }
    }
}
