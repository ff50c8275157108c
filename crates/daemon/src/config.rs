//! Daemon configuration
//!
//! Sources, later ones winning: built-in defaults, an optional
//! `slotboard.toml` (or the file named by `SLOTBOARD_CONFIG`), then
//! `SLOTBOARD_*` environment variables (`SLOTBOARD_PORT=8080`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use slotboard_core::domain::DEFAULT_MAX_UPLOAD_BYTES;
use std::path::PathBuf;

const DEFAULT_CONFIG_FILE: &str = "slotboard";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub host: String,
    pub port: u16,
    /// Directory uploaded backgrounds are written to
    pub upload_dir: PathBuf,
    /// URL path prefix `upload_dir` is served under
    pub upload_url_prefix: String,
    pub max_upload_bytes: usize,
    /// `pretty` or `json`
    pub log_format: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9979,
            upload_dir: PathBuf::from("uploads"),
            upload_url_prefix: "/uploads".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            log_format: "pretty".to_string(),
        }
    }
}

impl DaemonConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var("SLOTBOARD_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&file).required(false))
            .add_source(Environment::with_prefix("SLOTBOARD").try_parsing(true))
            .build()?;
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Message(
                "max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        if !self.upload_url_prefix.starts_with('/') {
            return Err(ConfigError::Message(format!(
                "upload_url_prefix must start with '/': {}",
                self.upload_url_prefix
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_lan_setup() {
        let config = DaemonConfig::default();
        assert_eq!(config.port, 9979);
        assert_eq!(config.upload_url_prefix, "/uploads");
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: DaemonConfig = Config::builder()
            .set_override("port", 8080)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_rejects_relative_url_prefix() {
        let config = DaemonConfig {
            upload_url_prefix: "uploads".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
