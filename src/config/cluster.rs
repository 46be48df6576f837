//! Cluster CLI configuration

use serde::{Deserialize, Serialize};

/// How and where the cluster CLI is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Namespace holding the monitored services
    pub namespace: String,
    /// Path or name of the `kubectl` binary
    pub kubectl: String,
    /// Optional kubeconfig context passed as `--context`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            namespace: "zero-to-running".to_string(),
            kubectl: "kubectl".to_string(),
            context: None,
        }
    }
}
