//! Server configuration
//!
//! Built-in defaults, then an optional config file, then `RESERVATION__*`
//! environment variables (e.g. `RESERVATION__STORE__MODE=sql`).

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Config file read when `RESERVATION_CONFIG` is unset; may be absent
pub const DEFAULT_CONFIG_FILE: &str = "reservation.toml";

const ENV_PREFIX: &str = "RESERVATION";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub store: StoreSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub bind_address: String,
    /// Prefix all API routes are mounted under
    pub base_path: String,
    pub request_timeout_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            base_path: "/".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl AppSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    #[default]
    Memory,
    Sql,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub mode: StoreMode,
    /// Data source name for the SQL backend, e.g. `sqlite://data/reservation.db`
    pub dsn: Option<String>,
    pub max_connections: u32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            mode: StoreMode::Memory,
            dsn: None,
            max_connections: 20,
        }
    }
}

impl Settings {
    /// Load from the file named by `RESERVATION_CONFIG` and the process environment
    pub fn load() -> Result<Self> {
        let path =
            std::env::var("RESERVATION_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::from_sources(Some(&path), None)
    }

    /// `env` replaces the process environment when given
    pub fn from_sources(file: Option<&str>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let settings: Settings = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.app.request_timeout_secs == 0 {
            bail!("app.request_timeout_secs must be greater than zero");
        }

        if self.store.mode == StoreMode::Sql {
            let dsn = match self.store.dsn.as_deref() {
                Some(dsn) if !dsn.trim().is_empty() => dsn,
                _ => bail!("store.dsn is required when store.mode is sql"),
            };
            if !dsn.starts_with("sqlite:") {
                bail!("store: unsupported data source name {}", dsn);
            }
            if self.store.max_connections == 0 {
                bail!("store.max_connections must be greater than zero");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults_without_file() {
        let settings =
            Settings::from_sources(Some("does-not-exist.toml"), env(&[])).unwrap();

        assert_eq!(settings.app.bind_address, "0.0.0.0:8080");
        assert_eq!(settings.app.request_timeout(), Duration::from_secs(60));
        assert_eq!(settings.store.mode, StoreMode::Memory);
        assert_eq!(settings.store.max_connections, 20);
    }

    #[test]
    fn test_environment_overrides() {
        let settings = Settings::from_sources(
            None,
            env(&[
                ("RESERVATION__APP__BIND_ADDRESS", "127.0.0.1:9000"),
                ("RESERVATION__STORE__MODE", "sql"),
                ("RESERVATION__STORE__DSN", "sqlite://data/reservation.db"),
                ("RESERVATION__STORE__MAX_CONNECTIONS", "5"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.app.bind_address, "127.0.0.1:9000");
        assert_eq!(settings.store.mode, StoreMode::Sql);
        assert_eq!(
            settings.store.dsn.as_deref(),
            Some("sqlite://data/reservation.db")
        );
        assert_eq!(settings.store.max_connections, 5);
    }

    #[test]
    fn test_sql_mode_requires_dsn() {
        let err = Settings::from_sources(None, env(&[("RESERVATION__STORE__MODE", "sql")]))
            .unwrap_err();
        assert!(err.to_string().contains("store.dsn"));
    }

    #[test]
    fn test_rejects_unknown_driver() {
        let settings = Settings {
            store: StoreSettings {
                mode: StoreMode::Sql,
                dsn: Some("postgres://localhost/reservation".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(settings.validate().is_err());
    }
}
