use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, StorageBackend};
use dotenvy::dotenv;
use migration::MigratorTrait;
use service::product::{
    repo::{InMemoryProductRepository, SeaOrmProductRepository},
    ProductRepository,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load config.toml when present; otherwise defaults plus `SERVER_HOST` / `SERVER_PORT`.
fn load_config() -> anyhow::Result<AppConfig> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) if e.downcast_ref::<std::io::Error>().is_some() => {
            warn!(error = %e, "config file unavailable; using environment defaults");
            let mut cfg = AppConfig::default();
            cfg.server.host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            cfg.server.port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8081);
            cfg.normalize_and_validate()?;
            Ok(cfg)
        }
        Err(e) => Err(e),
    }
}

/// Pick and initialise the product store named by `[storage]`.
pub async fn build_repository(cfg: &AppConfig) -> anyhow::Result<Arc<dyn ProductRepository>> {
    match cfg.storage.backend {
        StorageBackend::Memory => {
            info!(backend = "memory", "product store ready");
            Ok(Arc::new(InMemoryProductRepository::new()))
        }
        StorageBackend::Database => {
            common::env::ensure_env(&cfg.database.url).await?;
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            info!(backend = "database", "product store ready");
            Ok(Arc::new(SeaOrmProductRepository::new(db)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = load_config()?;
    let repo = build_repository(&cfg).await?;
    let app: Router = routes::build_router(AppState::new(repo), build_cors());

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(%addr, "starting product api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn database_backend_runs_migrations_on_sqlite() -> anyhow::Result<()> {
        let mut cfg = configs::load_from_str(
            r#"
            [storage]
            backend = "database"

            [database]
            url = "sqlite::memory:"
            min_connections = 1
            max_connections = 1
            "#,
        )?;
        cfg.normalize_and_validate()?;

        let repo = build_repository(&cfg).await?;
        assert!(repo.list().await?.is_empty());
        Ok(())
    }
}
