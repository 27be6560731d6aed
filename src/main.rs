use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use car_rental::config::database::DatabaseConfig;
use car_rental::config::environment::EnvironmentConfig;
use car_rental::create_app;
use car_rental::database::DatabaseConnection;
use car_rental::repositories::{InMemoryStore, Repositories};
use car_rental::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚗 Car Rental - API de alquiler de coches");
    info!("==========================================");

    let config = EnvironmentConfig::from_env()?;
    info!("⚙️ Entorno: {}", config.environment);
    if config.is_production() && config.cors_origins.is_empty() {
        warn!("⚠️ CORS_ORIGINS vacío en producción: se aceptan todos los orígenes");
    }
    if config.is_production() && config.uses_memory_store() {
        warn!("⚠️ Almacén en memoria en producción");
    }

    let repos = if config.uses_memory_store() {
        warn!("🧪 DATABASE_URL=memory:// - los datos se pierden al reiniciar");
        Repositories::in_memory(Arc::new(InMemoryStore::new()))
    } else {
        let db_config = DatabaseConfig::new(config.database_url.clone());
        let connection = match DatabaseConnection::connect(&db_config).await {
            Ok(conn) => {
                info!("✅ Base de datos conectada");
                conn
            }
            Err(e) => {
                error!("❌ Error conectando a la base de datos: {}", e);
                DatabaseConnection::lazy(&db_config)?
            }
        };
        Repositories::postgres(connection.pool().clone())
    };

    let state = AppState::new(repos, config.clone());
    state.uploads.ensure_dirs().await?;
    info!("📁 Fotos en {}", state.uploads.root().display());

    let app = create_app(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en {}", config.server_url());
    info!("🔍 Endpoints públicos:");
    info!("   GET  /api/health - Estado del servicio");
    info!("   GET  /api/cars - Coches con disponibilidad (?date=YYYY-MM-DD)");
    info!("   GET  /api/cars/:id - Detalle de coche");
    info!("   GET  /api/cars/search/:query - Buscar coches disponibles");
    info!("   GET  /api/cars/:id/whatsapp - Enlace de WhatsApp");
    info!("   GET  /api/drivers/available - Conductores disponibles");
    info!("   GET  /api/terms - Condiciones de alquiler");
    info!("🔐 Endpoints de administración:");
    info!("   POST /api/admin/verify - Obtener token de administrador");
    info!("   GET/POST /api/admin/cars, PUT/DELETE /api/admin/cars/:id, POST /api/admin/cars/:id/photo");
    info!("   GET/POST /api/admin/drivers, PUT/DELETE /api/admin/drivers/:id, POST /api/admin/drivers/:id/photo");
    info!("   GET/POST /api/admin/terms, PUT/DELETE /api/admin/terms/:id");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
