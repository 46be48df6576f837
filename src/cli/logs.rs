//! Logs command implementation

use crate::cli::LogsArgs;
use crate::cluster::{ensure_valid_service, ClusterClient};
use crate::logs::{fetch_recent_logs, NO_LOGS_AVAILABLE};

/// Handle `ztr-dashboard logs` command
///
/// Like `GET /api/logs`, a failing CLI yields the placeholder text.
pub async fn handle_logs(args: &LogsArgs) -> anyhow::Result<String> {
    ensure_valid_service(&args.service)?;
    let config = args.target.load_config()?;
    let cluster = ClusterClient::new(config.cluster);

    Ok(fetch_recent_logs(&cluster, &args.service, args.lines)
        .await
        .unwrap_or_else(|| NO_LOGS_AVAILABLE.to_string()))
}
