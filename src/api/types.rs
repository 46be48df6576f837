//! Request and response bodies of the REST endpoints.

use serde::{Deserialize, Serialize};

/// Query string of `GET /api/logs/:service`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogsQuery {
    pub lines: Option<u32>,
}

/// Response of `GET /api/logs/:service`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsResponse {
    pub logs: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub namespace: String,
    pub services: usize,
    pub active_log_sessions: usize,
}
