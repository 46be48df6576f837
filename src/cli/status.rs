//! Status command implementation

use crate::cli::output::{format_status_json, format_status_table};
use crate::cli::StatusArgs;
use crate::cluster::ClusterClient;
use crate::status::StatusAggregator;
use std::sync::Arc;

/// Handle `ztr-dashboard status` command
pub async fn handle_status(args: &StatusArgs) -> anyhow::Result<String> {
    let config = args.target.load_config()?;
    let cluster = Arc::new(ClusterClient::new(config.cluster.clone()));
    let snapshot = StatusAggregator::new(cluster, config.services).snapshot().await;

    if args.json {
        Ok(format_status_json(&snapshot)?)
    } else {
        Ok(format_status_table(&snapshot))
    }
}
