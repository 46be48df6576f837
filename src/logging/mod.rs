//! Structured logging helpers
//!
//! Filter directive construction for the tracing subscriber and correlation
//! ids for long-lived log streaming sessions.

use uuid::Uuid;

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig.
///
/// # Examples
///
/// ```
/// use ztr_dashboard::config::{LogFormat, LoggingConfig};
/// use ztr_dashboard::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("cluster".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,ztr_dashboard::cluster=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",ztr_dashboard::{}={}", component, level));
        }
    }

    filter_str
}

/// Generate a new live log session id using UUID v4
pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}
