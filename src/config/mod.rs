//! Configuration module for the dashboard
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`PORT`, `NAMESPACE`, `DASHBOARD_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use ztr_dashboard::config::DashboardConfig;
//!
//! let config = DashboardConfig::default();
//! assert_eq!(config.server.port, 3002);
//! assert_eq!(config.cluster.namespace, "zero-to-running");
//!
//! let toml = r#"
//! [cluster]
//! namespace = "staging"
//! "#;
//! let config: DashboardConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.cluster.namespace, "staging");
//! assert_eq!(config.services.len(), 4);
//! ```

pub mod cluster;
pub mod error;
pub mod logging;
pub mod server;
pub mod service;

pub use cluster::ClusterConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use service::{default_services, is_valid_label_value, ServiceConfig};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Unified configuration for the dashboard.
///
/// Built once at startup and shared read-only (behind `Arc`) with every
/// component; the service list never changes while the process runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Cluster CLI settings
    pub cluster: ClusterConfig,
    /// Services shown on the dashboard
    pub services: Vec<ServiceConfig>,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cluster: ClusterConfig::default(),
            services: default_services(),
            logging: LoggingConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` as the variable source.
    ///
    /// Invalid values are silently ignored (previous values are kept).
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Some(host) = lookup("DASHBOARD_HOST") {
            self.server.host = host;
        }
        if let Some(dir) = lookup("DASHBOARD_STATIC_DIR") {
            self.server.static_dir = PathBuf::from(dir);
        }

        if let Some(namespace) = lookup("NAMESPACE") {
            if !namespace.is_empty() {
                self.cluster.namespace = namespace;
            }
        }
        if let Some(kubectl) = lookup("DASHBOARD_KUBECTL") {
            if !kubectl.is_empty() {
                self.cluster.kubectl = kubectl;
            }
        }
        if let Some(context) = lookup("DASHBOARD_CONTEXT") {
            self.cluster.context = Some(context).filter(|c| !c.is_empty());
        }

        if let Some(level) = lookup("DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("DASHBOARD_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        if self.cluster.namespace.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "cluster.namespace".to_string(),
                message: "namespace cannot be empty".to_string(),
            });
        }
        if self.cluster.kubectl.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "cluster.kubectl".to_string(),
                message: "kubectl path cannot be empty".to_string(),
            });
        }

        if self.services.is_empty() {
            return Err(ConfigError::Validation {
                field: "services".to_string(),
                message: "at least one service is required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for (i, service) in self.services.iter().enumerate() {
            if !is_valid_label_value(&service.name) {
                return Err(ConfigError::Validation {
                    field: format!("services[{}].name", i),
                    message: format!("'{}' is not a valid label value", service.name),
                });
            }
            if !seen.insert(service.name.as_str()) {
                return Err(ConfigError::Validation {
                    field: format!("services[{}].name", i),
                    message: format!("duplicate service '{}'", service.name),
                });
            }
        }

        Ok(())
    }

    /// Names of the configured services, in configuration order.
    pub fn service_names(&self) -> Vec<String> {
        self.services.iter().map(|s| s.name.clone()).collect()
    }
}
