//! # Dashboard HTTP API
//!
//! JSON endpoints used by the dashboard front-end, plus the live log
//! stream and static files on every other path.
//!
//! ## Endpoints
//!
//! - `GET /api/status` - Status of every configured service with connection URLs
//! - `GET /api/logs/:service?lines=N` - Recent log lines (default 100)
//! - `POST /api/restart/:service` - Rollout restart of a service's deployment
//! - `GET /health` - Dashboard liveness
//! - any other path - WebSocket log stream (`?service=<name>`) or static file
//!
//! ## Example
//!
//! ```no_run
//! use ztr_dashboard::api::{create_router, AppState};
//! use ztr_dashboard::config::DashboardConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(DashboardConfig::default());
//! let state = Arc::new(AppState::new(config));
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3002").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Failures are returned as `{"error": "<message>"}` with status 400 for
//! invalid input and 500 when the cluster CLI fails.

mod error;
mod health;
mod logs;
mod restart;
mod status;
pub mod types;

pub use error::ApiError;
pub use types::*;

use crate::cluster::ClusterClient;
use crate::config::DashboardConfig;
use crate::status::StatusAggregator;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (64 KB). No endpoint takes a body.
const MAX_BODY_SIZE: usize = 64 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub cluster: Arc<ClusterClient>,
    pub status: StatusAggregator,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    /// Number of open WebSocket log streams
    pub log_sessions: Arc<AtomicUsize>,
    /// Cancelled on server shutdown; ends every live log stream
    pub shutdown: CancellationToken,
    /// Upgraded log stream tasks, awaited after the HTTP server stops
    pub log_streams: TaskTracker,
}

impl AppState {
    /// Create state backed by the real `kubectl` binary from the configuration.
    pub fn new(config: Arc<DashboardConfig>) -> Self {
        let cluster = Arc::new(ClusterClient::new(config.cluster.clone()));
        Self::with_cluster(config, cluster)
    }

    /// Create state around an existing cluster client.
    pub fn with_cluster(config: Arc<DashboardConfig>, cluster: Arc<ClusterClient>) -> Self {
        let status = StatusAggregator::new(Arc::clone(&cluster), config.services.clone());
        Self {
            config,
            cluster,
            status,
            start_time: Instant::now(),
            log_sessions: Arc::new(AtomicUsize::new(0)),
            shutdown: CancellationToken::new(),
            log_streams: TaskTracker::new(),
        }
    }

    pub fn active_log_sessions(&self) -> usize {
        self.log_sessions.load(Ordering::Relaxed)
    }

    /// Stop accepting log stream tasks and wait for the running ones to
    /// finish. Returns `false` if some were still running after `limit`.
    pub async fn wait_for_log_streams(&self, limit: Duration) -> bool {
        self.log_streams.close();
        tokio::time::timeout(limit, self.log_streams.wait()).await.is_ok()
    }
}

/// Create the dashboard router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(status::handle))
        .route("/api/logs/:service", get(logs::handle))
        .route("/api/restart/:service", post(restart::handle))
        .route("/health", get(health::handle))
        .fallback(crate::dashboard::upgrade_or_static)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
