//! Dashboard surface on the non-API paths.
//!
//! - WebSocket upgrades on any path stream live logs of the service named
//!   in the `service` query parameter
//! - Plain requests are served from the static front-end directory

pub mod handler;
pub mod websocket;

pub use handler::{upgrade_or_static, StreamParams};
pub use websocket::websocket_handler;
