//! Service status endpoint handler.

use crate::api::AppState;
use crate::status::StatusSnapshot;
use axum::{extract::State, Json};
use std::sync::Arc;

/// GET /api/status - Status of every configured service plus connection URLs.
///
/// Individual service failures are reported in-band in the snapshot.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<StatusSnapshot> {
    Json(state.status.snapshot().await)
}
