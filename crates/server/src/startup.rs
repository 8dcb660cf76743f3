use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use service::customer::repo::{InMemoryCustomerRepository, RawCustomerRepository, SeaOrmCustomerRepository};
use service::CustomerRepository;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load configuration from the TOML file named by `CONFIG_PATH`
/// (default `config.toml`), or from env vars when that file does not exist.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let result = if Path::new(&path).exists() {
        AppConfig::load_and_validate()
    } else {
        AppConfig::from_env()
    };
    result.map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Wire the repository named by `storage.backend`.
pub async fn build_repository(cfg: &AppConfig) -> Result<Arc<dyn CustomerRepository>, StartupError> {
    let backend = cfg.storage.backend;
    if !backend.needs_database() {
        let repo = if cfg.storage.seed {
            InMemoryCustomerRepository::with_sample_data()
        } else {
            InMemoryCustomerRepository::new()
        };
        warn!(backend = backend.as_str(), "customers are kept in process memory only");
        return Ok(Arc::new(repo));
    }

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.storage.run_migrations {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(format!("migrate up: {e}")))?;
        info!("migrations applied");
    }

    let repo: Arc<dyn CustomerRepository> = match backend {
        StorageBackend::Raw => Arc::new(RawCustomerRepository::new(db)),
        _ => Arc::new(SeaOrmCustomerRepository::new(db)),
    };
    Ok(repo)
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

/// Build the app for an already-chosen repository.
pub fn build_app(repo: Arc<dyn CustomerRepository>) -> Router {
    routes::build_router(ServerState::new(repo), build_cors())
}

/// Wire the configured backend and serve until the listener fails.
/// Logging is the caller's job.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let repo = build_repository(&cfg).await?;
    let app = build_app(repo);

    let addr = bind_addr(&cfg)?;
    info!(%addr, backend = cfg.storage.backend.as_str(), "starting customer api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
