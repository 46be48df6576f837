//! Status payload types.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Wire value used for unavailable uptime or metrics.
pub const NOT_AVAILABLE: &str = "N/A";

/// Display state of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceState {
    /// Pod is in phase `Running` and its `Ready` condition is true
    Running,
    /// Any other pod phase, surfaced verbatim
    Phase(String),
    /// No pod matches the service selector
    NotFound,
    /// The status query itself failed
    Error,
}

impl ServiceState {
    /// `Running` only when the pod is ready and running; otherwise the raw phase.
    pub fn from_pod(ready: bool, phase: &str) -> Self {
        if ready && phase == "Running" {
            ServiceState::Running
        } else {
            ServiceState::Phase(phase.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ServiceState::Running => "Running",
            ServiceState::Phase(phase) => phase,
            ServiceState::NotFound => "NotFound",
            ServiceState::Error => "Error",
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ServiceState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

fn or_not_available<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or(NOT_AVAILABLE))
}

/// Details of the pod chosen to represent a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodDetails {
    pub phase: String,
    #[serde(serialize_with = "or_not_available")]
    pub uptime: Option<String>,
    #[serde(serialize_with = "or_not_available")]
    pub cpu: Option<String>,
    #[serde(serialize_with = "or_not_available")]
    pub memory: Option<String>,
    pub pod_name: String,
}

/// Health of one service, as reported by `GET /api/status`.
///
/// Built through the constructors so an `Error` record never carries
/// readiness or pod fields and a `NotFound` record never carries pod fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub name: String,
    pub status: ServiceState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready: Option<bool>,
    #[serde(flatten)]
    pub pod: Option<PodDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceStatus {
    /// Status for a service backed by `pod`.
    pub fn from_pod(name: &str, ready: bool, pod: PodDetails) -> Self {
        Self {
            name: name.to_string(),
            status: ServiceState::from_pod(ready, &pod.phase),
            ready: Some(ready),
            pod: Some(pod),
            error: None,
        }
    }

    pub fn not_found(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: ServiceState::NotFound,
            ready: Some(false),
            pod: None,
            error: None,
        }
    }

    pub fn error(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: ServiceState::Error,
            ready: None,
            pod: None,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == ServiceState::Error
    }

    /// Whether the service is ready to serve traffic.
    pub fn is_ready(&self) -> bool {
        self.ready.unwrap_or(false)
    }
}

/// Response body of `GET /api/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub services: BTreeMap<String, ServiceStatus>,
    pub urls: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn details(phase: &str) -> PodDetails {
        PodDetails {
            phase: phase.to_string(),
            uptime: Some("5m 2s".to_string()),
            cpu: None,
            memory: Some("12Mi".to_string()),
            pod_name: "redis-7f9c".to_string(),
        }
    }

    #[test]
    fn test_state_from_pod() {
        assert_eq!(ServiceState::from_pod(true, "Running"), ServiceState::Running);
        assert_eq!(
            ServiceState::from_pod(false, "Running"),
            ServiceState::Phase("Running".to_string())
        );
        assert_eq!(
            ServiceState::from_pod(true, "Succeeded"),
            ServiceState::Phase("Succeeded".to_string())
        );
    }

    #[test]
    fn test_pod_status_serialization() {
        let status = ServiceStatus::from_pod("redis", true, details("Running"));
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "redis",
                "status": "Running",
                "ready": true,
                "phase": "Running",
                "uptime": "5m 2s",
                "cpu": "N/A",
                "memory": "12Mi",
                "podName": "redis-7f9c"
            })
        );
    }

    #[test]
    fn test_not_ready_running_pod_keeps_phase_string() {
        let status = ServiceStatus::from_pod("redis", false, details("Running"));
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["status"], "Running");
        assert_eq!(value["ready"], false);
        assert_eq!(status.status, ServiceState::Phase("Running".to_string()));
    }

    #[test]
    fn test_not_found_serialization() {
        let value = serde_json::to_value(ServiceStatus::not_found("redis")).unwrap();
        assert_eq!(
            value,
            json!({"name": "redis", "status": "NotFound", "ready": false})
        );
    }

    #[test]
    fn test_error_serialization_has_only_message() {
        let status = ServiceStatus::error("redis", "kubectl not found");
        assert!(status.is_error());
        assert!(!status.is_ready());
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(
            value,
            json!({"name": "redis", "status": "Error", "error": "kubectl not found"})
        );
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut snapshot = StatusSnapshot::default();
        snapshot
            .services
            .insert("redis".to_string(), ServiceStatus::not_found("redis"));
        snapshot
            .urls
            .insert("redis".to_string(), "redis://localhost:6379".to_string());

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["services"]["redis"]["status"], "NotFound");
        assert_eq!(value["urls"]["redis"], "redis://localhost:6379");
    }
}
