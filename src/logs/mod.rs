//! Log access: bounded tails and live follow sessions.

mod session;

pub use session::{LiveLogSession, SessionEnd, TERMINATION_GRACE};

use crate::cluster::ClusterClient;

/// Number of lines returned when the caller does not ask for a count.
pub const DEFAULT_TAIL_LINES: u32 = 100;

/// Text returned in place of logs that could not be fetched.
pub const NO_LOGS_AVAILABLE: &str = "No logs available";

/// Fetch the most recent `lines` log lines of a service.
///
/// Best-effort: any failure yields `None` instead of an error.
pub async fn fetch_recent_logs(cluster: &ClusterClient, service: &str, lines: u32) -> Option<String> {
    match cluster.tail_logs(service, lines).await {
        Ok(output) => Some(output.combined()),
        Err(e) => {
            tracing::warn!(service = %service, error = %e, "Log tail failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{ClusterError, CommandOutput, CommandRunner};
    use crate::config::ClusterConfig;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::process::Child;

    struct FixedOutput(Option<CommandOutput>);

    #[async_trait]
    impl CommandRunner for FixedOutput {
        async fn run(&self, _args: &[String]) -> Result<CommandOutput, ClusterError> {
            self.0.clone().ok_or_else(|| ClusterError::CommandFailed {
                command: "kubectl logs".to_string(),
                status: "exit code 1".to_string(),
                stderr: "no pods found".to_string(),
            })
        }

        fn spawn(&self, _args: &[String]) -> Result<Child, ClusterError> {
            Err(ClusterError::InvalidService("unused".to_string()))
        }
    }

    fn cluster(output: Option<CommandOutput>) -> ClusterClient {
        ClusterClient::with_runner(ClusterConfig::default(), Arc::new(FixedOutput(output)))
    }

    #[tokio::test]
    async fn test_fetch_recent_logs_returns_output() {
        let cluster = cluster(Some(CommandOutput {
            stdout: "started\n".to_string(),
            stderr: "warning: 2 pods\n".to_string(),
        }));
        let logs = fetch_recent_logs(&cluster, "backend", DEFAULT_TAIL_LINES).await;
        assert_eq!(logs.as_deref(), Some("started\nwarning: 2 pods\n"));
    }

    #[tokio::test]
    async fn test_fetch_recent_logs_failure_is_none() {
        let logs = fetch_recent_logs(&cluster(None), "backend", 10).await;
        assert!(logs.is_none());
    }

    #[tokio::test]
    async fn test_fetch_recent_logs_invalid_service_is_none() {
        let cluster = cluster(Some(CommandOutput::from_stdout("x")));
        assert!(fetch_recent_logs(&cluster, "not valid", 10).await.is_none());
    }
}
