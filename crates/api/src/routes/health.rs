//! Liveness probe.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
struct Health {
    status: &'static str,
    database: &'static str,
    version: &'static str,
}

/// GET `/health` - Reports whether the database answers.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status, code, database) = match state.db.ping().await {
        Ok(()) => ("healthy", StatusCode::OK, "up"),
        Err(e) => {
            tracing::error!(error = %e, "health check could not reach the database");
            ("degraded", StatusCode::SERVICE_UNAVAILABLE, "down")
        }
    };
    (
        code,
        Json(Health {
            status,
            database,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Public health route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
