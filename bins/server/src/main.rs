//! Khata API server.
//!
//! Loads configuration, connects to the database and serves the API.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use khata_api::{AppState, create_router};
use khata_db::connect;
use khata_shared::AppConfig;
use khata_shared::jwt::JwtService;

/// Used when `RUST_LOG` is unset; covers every workspace crate.
const DEFAULT_LOG_FILTER: &str = "khata=debug,khata_api=debug,khata_core=debug,khata_db=debug,\
khata_shared=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!(max_connections = config.database.max_connections, "Connected to database");

    let jwt_service = JwtService::new(&config.jwt);
    info!(
        expires_in = jwt_service.access_token_expires_in(),
        cookie_secure = config.auth.cookie_secure,
        "Token service configured"
    );

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        cookie_secure: config.auth.cookie_secure,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_workspace_crates() {
        for target in ["khata_api", "khata_core", "khata_db", "khata_shared"] {
            assert!(
                DEFAULT_LOG_FILTER.contains(&format!("{target}=debug")),
                "{target} missing from default filter"
            );
        }
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
