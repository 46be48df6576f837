//! Rollout restart endpoint handler.

use crate::api::{ApiError, AppState};
use crate::cluster::RestartAck;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

/// POST /api/restart/:service - Trigger a rollout restart.
///
/// Failure is always reported as an error response.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    Path(service): Path<String>,
) -> Result<Json<RestartAck>, ApiError> {
    match state.cluster.restart(&service).await {
        Ok(ack) => Ok(Json(ack)),
        Err(e) => {
            tracing::error!(service = %service, error = %e, "Rollout restart failed");
            Err(e.into())
        }
    }
}
