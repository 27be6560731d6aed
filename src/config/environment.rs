//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Secreto JWT usado solo fuera de producción
const DEV_JWT_SECRET: &str = "dev-only-car-rental-jwt-secret";

/// Errores de configuración
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("could not hash ADMIN_PASSWORD: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub admin_password_hash: String,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl EnvironmentConfig {
    /// Leer la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Construir la configuración desde un mapa de variables
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            vars.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environment = get("ENVIRONMENT").unwrap_or_else(|| "development".to_string());
        let is_production = environment == "production";

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) => secret,
            None if is_production => return Err(ConfigError::Missing("JWT_SECRET")),
            None => DEV_JWT_SECRET.to_string(),
        };

        // El hash tiene prioridad; la contraseña en claro solo se hashea al arrancar
        let admin_password_hash = match (get("ADMIN_PASSWORD_HASH"), get("ADMIN_PASSWORD")) {
            (Some(hash), _) => hash,
            (None, Some(password)) => bcrypt::hash(password, bcrypt::DEFAULT_COST)?,
            (None, None) => return Err(ConfigError::Missing("ADMIN_PASSWORD_HASH or ADMIN_PASSWORD")),
        };

        let cors_origins = get("CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            port: parse_number(&get, "PORT", 3000)?,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            database_url,
            jwt_secret,
            jwt_expiration: parse_number(&get, "JWT_EXPIRATION", 43_200)?,
            admin_password_hash,
            cors_origins,
            rate_limit_requests: parse_number(&get, "RATE_LIMIT_REQUESTS", 10)?,
            rate_limit_window: parse_number(&get, "RATE_LIMIT_WINDOW", 60)?,
            upload_dir: get("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public/uploads")),
            max_upload_bytes: parse_number(&get, "MAX_UPLOAD_BYTES", 5 * 1024 * 1024)?,
            environment,
        })
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Verificar si se pidió el almacén en memoria (`memory://`)
    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with("memory://")
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T, F>(get: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match get(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::from_vars(&vars(&[
            ("DATABASE_URL", "memory://"),
            ("ADMIN_PASSWORD_HASH", "$2b$04$abcdefghijklmnopqrstuv"),
        ]))
        .unwrap();

        assert_eq!(config.environment, "development");
        assert!(!config.is_production());
        assert_eq!(config.port, 3000);
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert_eq!(config.rate_limit_requests, 10);
        assert!(config.cors_origins.is_empty());
        assert!(config.uses_memory_store());
        assert_eq!(config.jwt_secret, DEV_JWT_SECRET);
    }

    #[test]
    fn test_missing_database_url() {
        let err = EnvironmentConfig::from_vars(&vars(&[("ADMIN_PASSWORD_HASH", "x")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_production_requires_jwt_secret() {
        let err = EnvironmentConfig::from_vars(&vars(&[
            ("ENVIRONMENT", "production"),
            ("DATABASE_URL", "postgres://localhost/cars"),
            ("ADMIN_PASSWORD_HASH", "x"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_invalid_port() {
        let err = EnvironmentConfig::from_vars(&vars(&[
            ("DATABASE_URL", "memory://"),
            ("ADMIN_PASSWORD_HASH", "x"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { name: "PORT", .. }));
    }

    #[test]
    fn test_plain_password_is_hashed() {
        let config = EnvironmentConfig::from_vars(&vars(&[
            ("DATABASE_URL", "memory://"),
            ("ADMIN_PASSWORD", "s3cret"),
            ("CORS_ORIGINS", "http://localhost:5173, http://localhost:5174"),
        ]))
        .unwrap();

        assert_ne!(config.admin_password_hash, "s3cret");
        assert!(bcrypt::verify("s3cret", &config.admin_password_hash).unwrap());
        assert_eq!(config.cors_origins.len(), 2);
    }
}
