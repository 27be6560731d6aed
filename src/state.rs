//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimitState;
use crate::repositories::Repositories;
use crate::services::clock::{Clock, SystemClock};
use crate::services::upload_service::UploadService;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub config: Arc<EnvironmentConfig>,
    pub jwt: JwtConfig,
    pub clock: Arc<dyn Clock>,
    pub uploads: UploadService,
    pub rate_limit: RateLimitState,
}

impl AppState {
    pub fn new(repos: Repositories, config: EnvironmentConfig) -> Self {
        Self {
            repos,
            jwt: JwtConfig::from(&config),
            clock: Arc::new(SystemClock),
            uploads: UploadService::new(config.upload_dir.clone()),
            rate_limit: RateLimitState::new(&config),
            config: Arc::new(config),
        }
    }

    /// Reemplazar el reloj (tests con fecha fija)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}
