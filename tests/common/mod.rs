//! Shared test utilities for dashboard integration tests.
//!
//! Provides a scripted `kubectl` stand-in, pod JSON builders and helpers
//! to build the router or run it on a real socket.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::json;
use std::net::SocketAddr;
use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::process::{Child, Command};
use ztr_dashboard::api::{create_router, AppState};
use ztr_dashboard::cluster::{ClusterClient, ClusterError, CommandOutput, CommandRunner};
use ztr_dashboard::config::DashboardConfig;

// =============================================================================
// Scripted kubectl
// =============================================================================

type Responder = dyn Fn(&[String]) -> Result<CommandOutput, ClusterError> + Send + Sync;

/// `CommandRunner` answering `run` calls from a closure and `spawn` calls
/// with `sh -c <follow_script>`.
pub struct FakeKubectl {
    respond: Box<Responder>,
    follow_script: Option<String>,
    calls: Mutex<Vec<Vec<String>>>,
    spawns: AtomicUsize,
    spawned_pids: Mutex<Vec<u32>>,
}

impl FakeKubectl {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&[String]) -> Result<CommandOutput, ClusterError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            follow_script: None,
            calls: Mutex::new(Vec::new()),
            spawns: AtomicUsize::new(0),
            spawned_pids: Mutex::new(Vec::new()),
        }
    }

    /// Run `script` through `sh -c` whenever a follow process is requested.
    pub fn with_follow_script(mut self, script: &str) -> Self {
        self.follow_script = Some(script.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls whose first argument is `verb` (`get`, `top`, `logs`, `rollout`).
    pub fn calls_to(&self, verb: &str) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|args| args.first().map(String::as_str) == Some(verb))
            .collect()
    }

    pub fn spawn_count(&self) -> usize {
        self.spawns.load(Ordering::SeqCst)
    }

    pub fn spawned_pids(&self) -> Vec<u32> {
        self.spawned_pids.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for FakeKubectl {
    async fn run(&self, args: &[String]) -> Result<CommandOutput, ClusterError> {
        self.calls.lock().unwrap().push(args.to_vec());
        (self.respond)(args)
    }

    fn spawn(&self, args: &[String]) -> Result<Child, ClusterError> {
        self.calls.lock().unwrap().push(args.to_vec());
        self.spawns.fetch_add(1, Ordering::SeqCst);

        let Some(ref script) = self.follow_script else {
            return Err(ClusterError::Spawn {
                program: "kubectl".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "kubectl not installed"),
            });
        };

        let child = Command::new("sh")
            .arg("-c")
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ClusterError::Spawn {
                program: "sh".to_string(),
                source,
            })?;

        if let Some(pid) = child.id() {
            self.spawned_pids.lock().unwrap().push(pid);
        }
        Ok(child)
    }
}

/// Service name from the `app=<name>` selector of a call.
pub fn selected_service(args: &[String]) -> Option<&str> {
    args.iter().find_map(|a| a.strip_prefix("app="))
}

/// Failed invocation as the real runner reports it.
pub fn command_failed(stderr: &str) -> ClusterError {
    ClusterError::CommandFailed {
        command: "kubectl".to_string(),
        status: "exit code 1".to_string(),
        stderr: stderr.to_string(),
    }
}

// =============================================================================
// Pod builders
// =============================================================================

/// One pod as returned by `get pods -o json`.
pub fn pod_json(name: &str, phase: &str, ready: bool, started_secs_ago: i64) -> serde_json::Value {
    let start = (Utc::now() - Duration::seconds(started_secs_ago)).to_rfc3339();
    json!({
        "metadata": {"name": name},
        "status": {
            "phase": phase,
            "startTime": start,
            "conditions": [{"type": "Ready", "status": if ready { "True" } else { "False" }}]
        }
    })
}

pub fn pod_list(items: Vec<serde_json::Value>) -> Result<CommandOutput, ClusterError> {
    Ok(CommandOutput::from_stdout(json!({"items": items}).to_string()))
}

pub fn top_output(pod: &str, cpu: &str, memory: &str) -> Result<CommandOutput, ClusterError> {
    Ok(CommandOutput::from_stdout(format!(
        "NAME   CPU(cores)   MEMORY(bytes)\n{}   {}   {}\n",
        pod, cpu, memory
    )))
}

/// Cluster where every service has one ready, running pod with metrics.
pub fn healthy_cluster() -> FakeKubectl {
    FakeKubectl::new(|args| match args.first().map(String::as_str) {
        Some("get") => {
            let service = selected_service(args).unwrap_or("unknown");
            pod_list(vec![pod_json(&format!("{}-0", service), "Running", true, 3_700)])
        }
        Some("top") => top_output(&args[2], "3m", "42Mi"),
        Some("logs") => Ok(CommandOutput::from_stdout("line 1\nline 2\n")),
        Some("rollout") => Ok(CommandOutput::from_stdout("deployment.apps/x restarted\n")),
        _ => Err(command_failed("unexpected command")),
    })
}

// =============================================================================
// App builders
// =============================================================================

/// Shared state around `runner` with the default configuration.
pub fn test_state(runner: Arc<FakeKubectl>) -> Arc<AppState> {
    test_state_with_config(runner, DashboardConfig::default())
}

pub fn test_state_with_config(runner: Arc<FakeKubectl>, config: DashboardConfig) -> Arc<AppState> {
    let cluster = Arc::new(ClusterClient::with_runner(config.cluster.clone(), runner));
    Arc::new(AppState::with_cluster(Arc::new(config), cluster))
}

/// Router serving static files from `dir`.
pub fn app_with_static_dir(runner: Arc<FakeKubectl>, dir: &Path) -> Router {
    let mut config = DashboardConfig::default();
    config.server.static_dir = dir.to_path_buf();
    create_router(test_state_with_config(runner, config))
}

/// Run the router on an ephemeral local port.
pub async fn spawn_server(state: Arc<AppState>) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Whether a process with `pid` still exists (zombies count as gone).
#[cfg(target_os = "linux")]
pub fn process_alive(pid: u32) -> bool {
    match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
        Ok(stat) => !stat
            .rsplit(')')
            .next()
            .map(|rest| rest.trim_start().starts_with('Z'))
            .unwrap_or(false),
        Err(_) => false,
    }
}

#[cfg(not(target_os = "linux"))]
pub fn process_alive(pid: u32) -> bool {
    std::process::Command::new("kill")
        .args(["-0", &pid.to_string()])
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Poll `check` until it holds or `timeout` passes.
pub async fn eventually<F: Fn() -> bool>(timeout: std::time::Duration, check: F) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(25)).await;
    }
    check()
}
