//! Health check endpoint handler.

use crate::api::{AppState, HealthResponse};
use axum::{extract::State, Json};
use std::sync::Arc;

/// GET /health - Report dashboard liveness.
///
/// Does not touch the cluster; use `/api/status` for service health.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        namespace: state.cluster.namespace().to_string(),
        services: state.status.services().len(),
        active_log_sessions: state.active_log_sessions(),
    })
}
