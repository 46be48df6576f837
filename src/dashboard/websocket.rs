//! WebSocket log streaming.
//!
//! Each connection owns one [`LiveLogSession`]. Output chunks are sent as
//! text frames in arrival order. The socket is closed when the process
//! ends or the server shuts down, and the process is killed when the
//! viewer goes away.

use axum::extract::ws::{close_code, CloseFrame, Message, WebSocket};
use axum::extract::WebSocketUpgrade;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::api::AppState;
use crate::config::is_valid_label_value;
use crate::logs::LiveLogSession;

pub const SERVICE_REQUIRED: &str = "Service parameter required";
pub const INVALID_SERVICE: &str = "Invalid service name";
pub const STREAM_FAILED: &str = "Failed to start log stream";
pub const SERVER_SHUTDOWN: &str = "Server shutting down";

/// Accept the upgrade and stream logs of `service` over the socket.
pub fn websocket_handler(
    ws: WebSocketUpgrade,
    state: Arc<AppState>,
    service: Option<String>,
) -> Response {
    ws.on_upgrade(move |socket| {
        let tracker = state.log_streams.clone();
        tracker.track_future(handle_socket(socket, state, service))
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, service: Option<String>) {
    let service = match service.filter(|s| !s.is_empty()) {
        Some(service) => service,
        None => {
            reject(socket, close_code::POLICY, SERVICE_REQUIRED).await;
            return;
        }
    };

    if !is_valid_label_value(&service) {
        tracing::warn!(service = %service, "Rejected log stream for invalid service name");
        reject(socket, close_code::POLICY, INVALID_SERVICE).await;
        return;
    }

    let session = match LiveLogSession::start(&state.cluster, &service) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(service = %service, error = %e, "Failed to start log stream");
            reject(socket, close_code::ERROR, STREAM_FAILED).await;
            return;
        }
    };

    let _guard = SessionGuard::new(&state.log_sessions);
    stream_session(socket, session, state.shutdown.clone()).await;
}

/// Pump process output into the socket until either side goes away.
async fn stream_session(socket: WebSocket, mut session: LiveLogSession, shutdown: CancellationToken) {
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            chunk = session.next_chunk() => match chunk {
                Some(text) => {
                    if sender.send(Message::Text(text)).await.is_err() {
                        tracing::debug!(session_id = %session.id(), "Viewer went away mid-send");
                        break;
                    }
                }
                None => {
                    // Process output ended: tell the viewer the stream is over.
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                }
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => {
                    tracing::debug!(session_id = %session.id(), "Viewer disconnected");
                    break;
                }
                Some(Ok(_)) => {}
            },
            _ = shutdown.cancelled() => {
                let frame = CloseFrame {
                    code: close_code::AWAY,
                    reason: Cow::Borrowed(SERVER_SHUTDOWN),
                };
                let _ = sender.send(Message::Close(Some(frame))).await;
                break;
            }
        }
    }

    session.close().await;
}

/// Close the socket straight away with `code` and `reason`.
async fn reject(mut socket: WebSocket, code: u16, reason: &'static str) {
    let frame = CloseFrame {
        code,
        reason: Cow::Borrowed(reason),
    };
    if let Err(e) = socket.send(Message::Close(Some(frame))).await {
        tracing::debug!(error = %e, "Failed to send close frame");
    }
}

/// Counts a live session for as long as it is held.
struct SessionGuard {
    counter: Arc<AtomicUsize>,
}

impl SessionGuard {
    fn new(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self {
            counter: Arc::clone(counter),
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::Relaxed);
    }
}
