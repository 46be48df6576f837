//! Restart command implementation

use crate::cli::RestartArgs;
use crate::cluster::ClusterClient;

/// Handle `ztr-dashboard restart` command
pub async fn handle_restart(args: &RestartArgs) -> anyhow::Result<String> {
    let config = args.target.load_config()?;
    let cluster = ClusterClient::new(config.cluster);
    let ack = cluster.restart(&args.service).await?;
    Ok(format!("✓ {}", ack.message))
}
