//! Live log sessions backed by a `logs -f` process.

use crate::cluster::{ClusterClient, ClusterError};
use crate::logging::generate_session_id;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// How long a killed follow process is given to exit before it is reported
/// as unresponsive.
pub const TERMINATION_GRACE: Duration = Duration::from_secs(5);

/// How long to wait for a process whose output already ended to exit on its own.
const EXIT_WAIT: Duration = Duration::from_millis(500);

const READ_BUFFER_SIZE: usize = 8 * 1024;
const CHANNEL_CAPACITY: usize = 64;

/// How a session's process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The process exited by itself with the given code (`None` if signalled)
    Exited(Option<i32>),
    /// The process was killed and reaped
    Terminated,
    /// Killing the process did not complete within [`TERMINATION_GRACE`]
    Unresponsive,
}

/// One follow process feeding one viewer.
///
/// Chunks from stdout and stderr are forwarded as they are read, without
/// coalescing. The session owns the process: [`LiveLogSession::close`] kills
/// it if still running, and dropping the session kills it as well.
pub struct LiveLogSession {
    id: String,
    service: String,
    child: Child,
    chunks: mpsc::Receiver<String>,
    readers: Vec<JoinHandle<()>>,
    output_closed: bool,
}

impl LiveLogSession {
    /// Spawn the follow process for `service`.
    pub fn start(cluster: &ClusterClient, service: &str) -> Result<Self, ClusterError> {
        let mut child = cluster.spawn_follow(service)?;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(forward(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(forward(stderr, tx.clone()));
        }
        drop(tx);

        let id = generate_session_id();
        tracing::info!(
            session_id = %id,
            service = %service,
            pid = ?child.id(),
            "Live log session started"
        );

        Ok(Self {
            id,
            service: service.to_string(),
            child,
            chunks: rx,
            readers,
            output_closed: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// OS process id of the follow process, if it has not been reaped.
    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    /// Next chunk of output, or `None` once both streams have ended.
    ///
    /// Cancel-safe.
    pub async fn next_chunk(&mut self) -> Option<String> {
        let chunk = self.chunks.recv().await;
        if chunk.is_none() {
            self.output_closed = true;
        }
        chunk
    }

    /// Tear the session down, making sure the process is gone.
    pub async fn close(mut self) -> SessionEnd {
        for reader in self.readers.drain(..) {
            reader.abort();
        }

        let end = self.reap().await;
        tracing::info!(
            session_id = %self.id,
            service = %self.service,
            end = ?end,
            "Live log session closed"
        );
        end
    }

    async fn reap(&mut self) -> SessionEnd {
        if self.output_closed {
            if let Ok(Ok(status)) = tokio::time::timeout(EXIT_WAIT, self.child.wait()).await {
                return SessionEnd::Exited(status.code());
            }
        }

        if let Ok(Some(status)) = self.child.try_wait() {
            return SessionEnd::Exited(status.code());
        }

        if let Err(e) = self.child.start_kill() {
            tracing::warn!(session_id = %self.id, error = %e, "Failed to kill follow process");
        }

        match tokio::time::timeout(TERMINATION_GRACE, self.child.wait()).await {
            Ok(Ok(_)) => SessionEnd::Terminated,
            Ok(Err(e)) => {
                tracing::warn!(session_id = %self.id, error = %e, "Failed to reap follow process");
                SessionEnd::Unresponsive
            }
            Err(_) => {
                tracing::warn!(
                    session_id = %self.id,
                    grace_secs = TERMINATION_GRACE.as_secs(),
                    "Follow process did not exit after kill"
                );
                SessionEnd::Unresponsive
            }
        }
    }
}

/// Copy everything read from `stream` into `tx`, one message per read.
///
/// A multi-byte character split across reads is held back until its
/// remaining bytes arrive.
fn forward<R>(mut stream: R, tx: mpsc::Sender<String>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; READ_BUFFER_SIZE];
        let mut pending: Vec<u8> = Vec::new();
        loop {
            match stream.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => {
                    pending.extend_from_slice(&buf[..n]);
                    let complete = complete_utf8_prefix(&pending);
                    if complete == 0 {
                        continue;
                    }
                    let chunk = String::from_utf8_lossy(&pending[..complete]).into_owned();
                    pending.drain(..complete);
                    if tx.send(chunk).await.is_err() {
                        return;
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Follow process stream read failed");
                    break;
                }
            }
        }
        if !pending.is_empty() {
            let _ = tx.send(String::from_utf8_lossy(&pending).into_owned()).await;
        }
    })
}

/// Length of `bytes` without a trailing, still incomplete UTF-8 sequence.
///
/// Invalid bytes count as complete so they are replaced rather than held.
fn complete_utf8_prefix(bytes: &[u8]) -> usize {
    let len = bytes.len();
    for back in 1..=len.min(3) {
        let i = len - back;
        let byte = bytes[i];
        if byte & 0xC0 == 0x80 {
            continue;
        }
        let width = match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        return if back < width { i } else { len };
    }
    len
}
