//! Liveness endpoint for load balancers and deploy checks.
//!
//! `/health` sits outside the tree routes and takes no `user_id`. It
//! answers 200 while the record store responds and 503 once it stops, so
//! an orchestrator can pull the instance without parsing the body.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `"ok"` or `"degraded"`.
    pub status: &'static str,
    pub version: &'static str,
    /// `"up"` when `SELECT 1` succeeded against the tree store.
    pub database: &'static str,
}

async fn report(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let (code, status, database) = match arbor_db::health_check(&state.pool).await {
        Ok(()) => (StatusCode::OK, "ok", "up"),
        Err(e) => {
            tracing::warn!(error = %e, "Tree store is not answering");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
        }
    };

    let body = HealthReport {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
    };
    (code, Json(body))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
