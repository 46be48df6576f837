//! Status aggregation across the configured services.

pub mod types;

pub use types::*;

use crate::cluster::ClusterClient;
use crate::config::ServiceConfig;
use futures::future::join_all;
use std::sync::Arc;

/// Builds [`StatusSnapshot`]s for a fixed list of services.
#[derive(Clone)]
pub struct StatusAggregator {
    cluster: Arc<ClusterClient>,
    services: Arc<[ServiceConfig]>,
}

impl StatusAggregator {
    pub fn new(cluster: Arc<ClusterClient>, services: Vec<ServiceConfig>) -> Self {
        Self {
            cluster,
            services: services.into(),
        }
    }

    pub fn services(&self) -> &[ServiceConfig] {
        &self.services
    }

    /// Query every service concurrently and assemble one snapshot.
    ///
    /// The result always holds exactly one entry per configured service,
    /// whatever happens to the individual queries.
    pub async fn snapshot(&self) -> StatusSnapshot {
        let handles: Vec<_> = self
            .services
            .iter()
            .map(|service| {
                let cluster = Arc::clone(&self.cluster);
                let name = service.name.clone();
                tokio::spawn(async move { cluster.query_service(&name).await })
            })
            .collect();

        let results = join_all(handles).await;

        let mut snapshot = StatusSnapshot::default();
        for (service, result) in self.services.iter().zip(results) {
            let status = match result {
                Ok(status) => status,
                Err(e) => {
                    tracing::error!(service = %service.name, error = %e, "Status query task failed");
                    ServiceStatus::error(&service.name, format!("status query failed: {}", e))
                }
            };
            snapshot.services.insert(service.name.clone(), status);
            snapshot
                .urls
                .insert(service.name.clone(), service.url.clone());
        }

        let ready = snapshot.services.values().filter(|s| s.is_ready()).count();
        tracing::debug!(
            services = snapshot.services.len(),
            ready,
            "Built status snapshot"
        );

        snapshot
    }
}
