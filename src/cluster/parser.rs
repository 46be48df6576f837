//! Parsing of `kubectl` output.

use super::error::ClusterError;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `kubectl get pods -o json` response (only the fields we read).
#[derive(Debug, Default, Deserialize)]
pub struct PodList {
    #[serde(default)]
    pub items: Vec<Pod>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Pod {
    #[serde(default)]
    pub metadata: PodMetadata,
    #[serde(default)]
    pub status: PodStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct PodMetadata {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodStatus {
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub conditions: Option<Vec<PodCondition>>,
    #[serde(default)]
    pub start_time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PodCondition {
    #[serde(rename = "type")]
    pub condition_type: String,
    #[serde(default)]
    pub status: String,
}

impl Pod {
    /// Pod phase, `"Unknown"` when the API left it out.
    pub fn phase(&self) -> &str {
        self.status.phase.as_deref().unwrap_or("Unknown")
    }

    /// True iff the `Ready` condition is `"True"`.
    pub fn is_ready(&self) -> bool {
        self.status
            .conditions
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|c| c.condition_type == "Ready")
            .is_some_and(|c| c.status == "True")
    }

    /// Parsed `status.startTime`; `None` if absent or malformed.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.status.start_time.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Parse the JSON document printed by `kubectl get pods -o json`.
pub fn parse_pod_list(body: &str) -> Result<PodList, ClusterError> {
    serde_json::from_str(body).map_err(|e| ClusterError::parse("pod list", e))
}

/// Pick the pod reported for a service.
///
/// The newest pod by start time wins; pods that have not started yet rank
/// below started ones, and equal start times fall back to the
/// lexicographically smallest name.
pub fn select_pod(pods: &[Pod]) -> Option<&Pod> {
    pods.iter().max_by(|a, b| {
        a.started_at()
            .cmp(&b.started_at())
            .then_with(|| b.metadata.name.cmp(&a.metadata.name))
    })
}

/// CPU and memory as printed by `kubectl top pod`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUsage {
    pub cpu: String,
    pub memory: String,
}

/// Parse `kubectl top pod` tabular output.
///
/// ```text
/// NAME          CPU(cores)   MEMORY(bytes)
/// redis-7f9c    3m           12Mi
/// ```
pub fn parse_top_output(text: &str) -> Option<ResourceUsage> {
    let row = text.lines().nth(1)?;
    let fields: Vec<&str> = row.split_whitespace().collect();
    if fields.len() < 3 {
        return None;
    }
    Some(ResourceUsage {
        cpu: fields[1].to_string(),
        memory: fields[2].to_string(),
    })
}
