//! Configuration loading and management
//!
//! Settings come from an optional YAML file, then `HUSK_*` environment
//! variables override individual values.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 5000
//!   base_path: /api
//! table:
//!   page_size: 10
//! orders:
//!   status_policy: workflow
//! ```

use crate::core::error::{ConfigError, HuskResult};
use crate::entities::order::StatusPolicy;
use crate::table::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_WINDOW};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Prefix for every entity route, e.g. `/api`. Empty mounts at the root.
    pub base_path: String,
    /// Allow cross-origin requests from any origin
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            base_path: String::new(),
            cors: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub page_size: usize,
    pub page_window: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_window: DEFAULT_PAGE_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdersConfig {
    pub status_policy: StatusPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Where the dashboards find the REST service
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub table: TableConfig,
    pub orders: OrdersConfig,
    pub client: ClientConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> HuskResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            })?;
        config.validated()
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> HuskResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    /// Override values from `(name, value)` pairs shaped like `HUSK_*` variables
    pub fn apply_overrides<I, K, V>(mut self, vars: I) -> HuskResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let value: String = value.into();
            match key.as_ref() {
                "HUSK_HOST" => self.server.host = value,
                "HUSK_PORT" => self.server.port = parse_value("HUSK_PORT", &value)?,
                "HUSK_BASE_PATH" => self.server.base_path = value,
                "HUSK_PAGE_SIZE" => self.table.page_size = parse_value("HUSK_PAGE_SIZE", &value)?,
                "HUSK_STATUS_POLICY" => {
                    self.orders.status_policy =
                        StatusPolicy::parse(&value).ok_or_else(|| ConfigError::InvalidValue {
                            field: "HUSK_STATUS_POLICY".into(),
                            value: value.clone(),
                            message: "expected 'unconstrained' or 'workflow'".into(),
                        })?
                }
                "HUSK_API_URL" => self.client.base_url = value,
                "HUSK_LOG" => self.logging.filter = value,
                _ => {}
            }
        }
        self.validated()
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> HuskResult<Self> {
        self.apply_overrides(std::env::vars().filter(|(key, _)| key.starts_with("HUSK_")))
    }

    pub fn validate(&self) -> HuskResult<()> {
        if self.table.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "table.page_size".into(),
                value: "0".into(),
                message: "page size must be at least 1".into(),
            }
            .into());
        }
        let base_path = &self.server.base_path;
        if !base_path.is_empty() && (!base_path.starts_with('/') || base_path.ends_with('/')) {
            return Err(ConfigError::InvalidValue {
                field: "server.base_path".into(),
                value: base_path.clone(),
                message: "must start with '/' and not end with '/'".into(),
            }
            .into());
        }
        Ok(())
    }

    fn validated(self) -> HuskResult<Self> {
        self.validate()?;
        Ok(self)
    }

    pub fn bind_addr(&self) -> HuskResult<SocketAddr> {
        let raw = format!("{}:{}", self.server.host, self.server.port);
        raw.parse().map_err(|_| {
            ConfigError::InvalidValue {
                field: "server.host".into(),
                value: raw.clone(),
                message: "not a socket address".into(),
            }
            .into()
        })
    }
}

fn parse_value<T: std::str::FromStr>(field: &str, value: &str) -> HuskResult<T> {
    value.trim().parse().map_err(|_| {
        ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            message: "not a number".into(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.table.page_size, 10);
        assert_eq!(config.table.page_window, 5);
        assert_eq!(config.orders.status_policy, StatusPolicy::Unconstrained);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = AppConfig::from_yaml_str(
            "server:\n  port: 8080\norders:\n  status_policy: workflow\n",
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.orders.status_policy, StatusPolicy::Workflow);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .apply_overrides([
                ("HUSK_PORT", "7000"),
                ("HUSK_BASE_PATH", "/api"),
                ("HUSK_STATUS_POLICY", "Workflow"),
                ("UNRELATED", "x"),
            ])
            .unwrap();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.server.base_path, "/api");
        assert_eq!(config.orders.status_policy, StatusPolicy::Workflow);
    }

    #[test]
    fn test_bad_override_is_config_error() {
        let err = AppConfig::default()
            .apply_overrides([("HUSK_PORT", "eighty")])
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(AppConfig::from_yaml_str("table:\n  page_size: 0\n").is_err());
        assert!(AppConfig::from_yaml_str("server:\n  base_path: api/\n").is_err());
    }

    #[test]
    fn test_bind_addr() {
        let addr = AppConfig::default().bind_addr().unwrap();
        assert_eq!(addr.port(), 5000);
    }
}
