//! Zero-to-Running dashboard
//!
//! This library reports pod status, streams logs and triggers rollout
//! restarts for a fixed set of services by shelling out to `kubectl`.

pub mod api;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod logs;
pub mod status;
