//! `GET /api/health`: liveness plus a database check that counts listings.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use chrono::Utc;
use dreamhome_core::types::Timestamp;
use dreamhome_db::models::property::Property;
use dreamhome_db::{Filter, TableAccessor};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answered, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Listings currently on file; absent when the database is unreachable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listings: Option<i64>,
    pub checked_at: Timestamp,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let listings = match dreamhome_db::health_check(&state.pool).await {
        Ok(()) => TableAccessor::<Property>::count(&state.pool, &Filter::new())
            .await
            .map_err(|e| tracing::warn!(error = %e, "Health check could not count listings"))
            .ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            None
        }
    };
    let db_healthy = listings.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        listings,
        checked_at: Utc::now(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
