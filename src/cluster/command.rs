//! CLI invocation seam.
//!
//! Every interaction with the cluster goes through [`CommandRunner`]. The
//! production implementation, [`KubectlRunner`], executes the configured
//! `kubectl` binary directly (never through a shell) so service names can
//! not inject extra arguments or commands.

use super::error::ClusterError;
use crate::config::ClusterConfig;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::{Child, Command};

/// Captured output of a completed CLI invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn from_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Stdout followed by stderr, the way a terminal would show both.
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            return self.stdout.clone();
        }
        let mut text = String::with_capacity(self.stdout.len() + self.stderr.len());
        text.push_str(&self.stdout);
        text.push_str(&self.stderr);
        text
    }
}

/// Runs cluster CLI commands.
///
/// This trait is object-safe and used as `Arc<dyn CommandRunner>` so tests
/// can substitute scripted output for a real cluster.
#[async_trait]
pub trait CommandRunner: Send + Sync + 'static {
    /// Run a command to completion. A non-zero exit status is an error.
    async fn run(&self, args: &[String]) -> Result<CommandOutput, ClusterError>;

    /// Start a long-running command with stdout and stderr piped.
    ///
    /// The returned child must be configured to be killed when dropped.
    fn spawn(&self, args: &[String]) -> Result<Child, ClusterError>;
}

/// [`CommandRunner`] backed by a local `kubectl` binary.
#[derive(Debug, Clone)]
pub struct KubectlRunner {
    program: String,
}

impl KubectlRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, args: &[String]) -> Command {
        let mut command = Command::new(&self.program);
        command.args(args).stdin(Stdio::null()).kill_on_drop(true);
        command
    }

    fn spawn_error(&self, source: std::io::Error) -> ClusterError {
        ClusterError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

#[async_trait]
impl CommandRunner for KubectlRunner {
    async fn run(&self, args: &[String]) -> Result<CommandOutput, ClusterError> {
        tracing::debug!(command = %display_command(&self.program, args), "Running cluster command");

        let output = self
            .command(args)
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            let status = match output.status.code() {
                Some(code) => format!("exit code {}", code),
                None => "terminated by signal".to_string(),
            };
            return Err(ClusterError::CommandFailed {
                command: display_command(&self.program, args),
                status,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }

    fn spawn(&self, args: &[String]) -> Result<Child, ClusterError> {
        tracing::debug!(command = %display_command(&self.program, args), "Spawning cluster command");

        self.command(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))
    }
}

/// Render a command line for logs and error messages.
pub fn display_command(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

fn selector(service: &str) -> String {
    format!("app={}", service)
}

/// Append the namespace and optional context flags shared by every call.
fn scoped(config: &ClusterConfig, mut args: Vec<String>) -> Vec<String> {
    args.push("-n".to_string());
    args.push(config.namespace.clone());
    if let Some(context) = &config.context {
        args.push("--context".to_string());
        args.push(context.clone());
    }
    args
}

fn owned(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// `get pods -l app=<service> -o json`
pub fn get_pods_args(config: &ClusterConfig, service: &str) -> Vec<String> {
    let selector = selector(service);
    scoped(config, owned(&["get", "pods", "-l", &selector, "-o", "json"]))
}

/// `top pod <pod>`
pub fn top_pod_args(config: &ClusterConfig, pod: &str) -> Vec<String> {
    scoped(config, owned(&["top", "pod", pod]))
}

/// `logs -l app=<service> --tail=<lines>`
pub fn tail_logs_args(config: &ClusterConfig, service: &str, lines: u32) -> Vec<String> {
    let selector = selector(service);
    let tail = format!("--tail={}", lines);
    scoped(config, owned(&["logs", "-l", &selector, &tail]))
}

/// `logs -l app=<service> -f`
pub fn follow_logs_args(config: &ClusterConfig, service: &str) -> Vec<String> {
    let selector = selector(service);
    scoped(config, owned(&["logs", "-l", &selector, "-f"]))
}

/// `rollout restart deployment -l app=<service>`
pub fn rollout_restart_args(config: &ClusterConfig, service: &str) -> Vec<String> {
    let selector = selector(service);
    scoped(
        config,
        owned(&["rollout", "restart", "deployment", "-l", &selector]),
    )
}
