//! Error types for cluster CLI invocations.

use thiserror::Error;

/// Errors that can occur while talking to the cluster CLI.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// The CLI binary could not be started
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The CLI ran but exited unsuccessfully
    #[error("command `{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The CLI output did not have the expected shape
    #[error("failed to parse {what}: {message}")]
    Parse { what: &'static str, message: String },

    /// Service name is not usable as a label selector value
    #[error("invalid service name: {0:?}")]
    InvalidService(String),
}

impl ClusterError {
    pub(crate) fn parse(what: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            what,
            message: err.to_string(),
        }
    }
}
