//! Rollout restarts.

use super::{ensure_valid_service, rollout_restart_args, ClusterClient, ClusterError};
use serde::Serialize;

/// Acknowledgment that a restart was accepted by the cluster.
///
/// It does not mean the rollout finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestartAck {
    pub success: bool,
    pub message: String,
}

impl ClusterClient {
    /// Trigger `rollout restart` for the deployments of a service.
    ///
    /// Unlike status and log queries, failures are returned to the caller.
    pub async fn restart(&self, service: &str) -> Result<RestartAck, ClusterError> {
        ensure_valid_service(service)?;

        let output = self
            .runner
            .run(&rollout_restart_args(&self.config, service))
            .await?;

        tracing::info!(
            service = %service,
            namespace = %self.config.namespace,
            output = %output.stdout.trim(),
            "Rollout restart accepted"
        );

        Ok(RestartAck {
            success: true,
            message: format!("Restarting {}...", service),
        })
    }
}
