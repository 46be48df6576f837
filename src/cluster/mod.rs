//! Cluster query adapter.
//!
//! Wraps the cluster CLI: pod status lookups, resource usage, log tails,
//! follow processes and rollout restarts for services identified by their
//! `app=<name>` label in the configured namespace.

mod command;
mod error;
mod parser;
mod rollout;
mod uptime;


pub use command::*;
pub use error::*;
pub use parser::*;
pub use rollout::RestartAck;
pub use uptime::*;

use crate::config::{is_valid_label_value, ClusterConfig};
use crate::status::{PodDetails, ServiceStatus};
use chrono::Utc;
use std::sync::Arc;
use tokio::process::Child;

/// Client for one namespace of the cluster.
pub struct ClusterClient {
    config: ClusterConfig,
    runner: Arc<dyn CommandRunner>,
}

impl ClusterClient {
    /// Create a client that invokes the configured `kubectl` binary.
    pub fn new(config: ClusterConfig) -> Self {
        let runner = Arc::new(KubectlRunner::new(config.kubectl.clone()));
        Self { config, runner }
    }

    /// Create a client with a custom command runner (for testing).
    pub fn with_runner(config: ClusterConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    /// Report the status of one service.
    ///
    /// Never fails: a broken query becomes an `Error` record for this
    /// service only.
    pub async fn query_service(&self, name: &str) -> ServiceStatus {
        match self.try_query_service(name).await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(service = %name, error = %e, "Service status query failed");
                ServiceStatus::error(name, e.to_string())
            }
        }
    }

    async fn try_query_service(&self, name: &str) -> Result<ServiceStatus, ClusterError> {
        ensure_valid_service(name)?;

        let output = self.runner.run(&get_pods_args(&self.config, name)).await?;
        let pods = parse_pod_list(&output.stdout)?;

        let Some(pod) = select_pod(&pods.items) else {
            tracing::debug!(service = %name, "No pods match service selector");
            return Ok(ServiceStatus::not_found(name));
        };

        if pods.items.len() > 1 {
            tracing::debug!(
                service = %name,
                pods = pods.items.len(),
                selected = %pod.metadata.name,
                "Multiple pods match, reporting newest"
            );
        }

        let ready = pod.is_ready();
        let uptime = pod.started_at().map(|start| uptime_since(start, Utc::now()));
        let usage = self.resource_usage(&pod.metadata.name).await;

        let details = PodDetails {
            phase: pod.phase().to_string(),
            uptime,
            cpu: usage.as_ref().map(|u| u.cpu.clone()),
            memory: usage.map(|u| u.memory),
            pod_name: pod.metadata.name.clone(),
        };

        Ok(ServiceStatus::from_pod(name, ready, details))
    }

    /// Best-effort CPU and memory for a pod.
    ///
    /// Returns `None` when the metrics API is unavailable or the output is
    /// not understood; failures are logged at debug level only.
    pub async fn resource_usage(&self, pod: &str) -> Option<ResourceUsage> {
        if pod.is_empty() {
            return None;
        }
        match self.runner.run(&top_pod_args(&self.config, pod)).await {
            Ok(output) => parse_top_output(&output.stdout),
            Err(e) => {
                tracing::debug!(pod = %pod, error = %e, "Resource metrics unavailable");
                None
            }
        }
    }

    /// Fetch the last `lines` log lines of a service.
    pub async fn tail_logs(&self, service: &str, lines: u32) -> Result<CommandOutput, ClusterError> {
        ensure_valid_service(service)?;
        self.runner
            .run(&tail_logs_args(&self.config, service, lines))
            .await
    }

    /// Start a `logs -f` process for a service with both output streams piped.
    pub fn spawn_follow(&self, service: &str) -> Result<Child, ClusterError> {
        ensure_valid_service(service)?;
        self.runner.spawn(&follow_logs_args(&self.config, service))
    }
}

/// Reject names that can not be used as an `app=<name>` selector value.
pub fn ensure_valid_service(name: &str) -> Result<(), ClusterError> {
    if is_valid_label_value(name) {
        Ok(())
    } else {
        Err(ClusterError::InvalidService(name.to_string()))
    }
}
