//! Output formatting helpers for CLI commands

use crate::status::{ServiceState, ServiceStatus, StatusSnapshot, NOT_AVAILABLE};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

/// Format a status snapshot as a table, one row per service.
pub fn format_status_table(snapshot: &StatusSnapshot) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Service", "Status", "Ready", "Pod", "Uptime", "CPU", "Memory", "URL",
    ]);

    for (name, status) in &snapshot.services {
        let pod = status.pod.as_ref();
        let field = |value: Option<&Option<String>>| {
            value
                .and_then(|v| v.as_deref())
                .unwrap_or(NOT_AVAILABLE)
                .to_string()
        };

        table.add_row(vec![
            Cell::new(name),
            Cell::new(status_label(status)),
            Cell::new(ready_icon(status)),
            Cell::new(pod.map(|p| p.pod_name.as_str()).unwrap_or("-")),
            Cell::new(field(pod.map(|p| &p.uptime))),
            Cell::new(field(pod.map(|p| &p.cpu))),
            Cell::new(field(pod.map(|p| &p.memory))),
            Cell::new(snapshot.urls.get(name).map(String::as_str).unwrap_or("")),
        ]);
    }

    let mut out = table.to_string();
    for status in snapshot.services.values() {
        if let Some(ref error) = status.error {
            out.push_str(&format!("\n{} {}: {}", "error".red(), status.name, error));
        }
    }
    out
}

/// Format a status snapshot exactly as `GET /api/status` returns it.
pub fn format_status_json(snapshot: &StatusSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

/// Colored status label for a service.
pub fn status_label(status: &ServiceStatus) -> String {
    let label = status.status.as_str();
    match status.status {
        ServiceState::Running => label.green().to_string(),
        ServiceState::Phase(_) => label.yellow().to_string(),
        ServiceState::NotFound => label.dimmed().to_string(),
        ServiceState::Error => label.red().to_string(),
    }
}

/// Get readiness icon for a service
pub fn ready_icon(status: &ServiceStatus) -> &'static str {
    match status.ready {
        Some(true) => "✓",
        Some(false) => "✗",
        None => "?",
    }
}
