use std::{env, net::SocketAddr, time::Duration};

use axum::Router;
use configs::{AppConfig, DatabaseConfig, ServerConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file first; without one, SERVER_HOST/SERVER_PORT and DATABASE_URL.
fn load_config() -> Result<AppConfig, StartupError> {
    let mut cfg = match configs::load_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(err = %e, "config file unavailable, falling back to environment");
            let defaults = ServerConfig::default();
            let host = env::var("SERVER_HOST").unwrap_or(defaults.host.clone());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(defaults.port);
            AppConfig {
                server: ServerConfig { host, port, ..defaults },
                database: DatabaseConfig::default(),
            }
        }
    };
    cfg.normalize_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(cfg)
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Connect and bring the schema up to date.
pub async fn prepare_database(cfg: &DatabaseConfig) -> Result<DatabaseConnection, StartupError> {
    let db = models::db::connect_with_config(cfg).await?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    info!(sqlite = cfg.is_sqlite(), "database schema is up to date");
    Ok(db)
}

pub fn build_app(db: DatabaseConnection, server: &ServerConfig) -> Router {
    let state = ServerState::new(db);
    routes::build_router(state, build_cors(), Duration::from_secs(server.request_timeout_secs))
}

/// Public entry: load configuration, prepare the database and serve HTTP.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = load_config()?;
    let db = prepare_database(&cfg.database).await?;
    let app = build_app(db, &cfg.server);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting airline registry server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
