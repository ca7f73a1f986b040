//! Server configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::address::{BindAddress, DEFAULT_ADDRESS};
use crate::domain::clipboard::ClipboardCommand;
use crate::domain::duration::Duration;
use crate::domain::error::ConfigError;

use super::settings::ServerSettings;

/// Server configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub address: Option<String>,
    pub log_file: Option<String>,
    pub copy_command: Option<String>,
    pub paste_command: Option<String>,
    pub timeout: Option<String>,
}

impl ServerConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            address: Some(DEFAULT_ADDRESS.to_string()),
            ..Self::default()
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            address: other.address.or(self.address),
            log_file: other.log_file.or(self.log_file),
            copy_command: other.copy_command.or(self.copy_command),
            paste_command: other.paste_command.or(self.paste_command),
            timeout: other.timeout.or(self.timeout),
        }
    }

    /// Validate every set field and freeze the result into settings.
    pub fn into_settings(self) -> Result<ServerSettings, ConfigError> {
        let address = match self.address.as_deref() {
            Some(s) => s.parse::<BindAddress>().map_err(|e| invalid("address", e))?,
            None => BindAddress::default(),
        };

        let log_file = self
            .log_file
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let copy_command = parse_optional::<ClipboardCommand>("copy_command", self.copy_command)?;
        let paste_command =
            parse_optional::<ClipboardCommand>("paste_command", self.paste_command)?;
        let timeout = parse_optional::<Duration>("timeout", self.timeout)?;

        Ok(ServerSettings {
            address,
            log_file,
            copy_command,
            paste_command,
            timeout,
        })
    }
}

fn parse_optional<T>(key: &str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|s| s.parse::<T>().map_err(|e| invalid(key, e)))
        .transpose()
}

fn invalid(key: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_localhost() {
        let config = ServerConfig::defaults();
        assert_eq!(config.address.as_deref(), Some("127.0.0.1:8042"));
        assert!(config.log_file.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn merge_prefers_other() {
        let base = ServerConfig {
            address: Some("127.0.0.1:8042".to_string()),
            timeout: Some("30s".to_string()),
            ..Default::default()
        };
        let other = ServerConfig {
            address: Some("0.0.0.0:9000".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.address.as_deref(), Some("0.0.0.0:9000"));
        assert_eq!(merged.timeout.as_deref(), Some("30s"));
    }

    #[test]
    fn into_settings_parses_fields() {
        let config = ServerConfig {
            address: Some("localhost:0".to_string()),
            log_file: Some("/tmp/pbserver.log".to_string()),
            copy_command: Some("xclip -selection clipboard -in".to_string()),
            paste_command: None,
            timeout: Some("1m".to_string()),
        };

        let settings = config.into_settings().unwrap();
        assert_eq!(settings.address.to_string(), "localhost:0");
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/pbserver.log")));
        assert_eq!(
            settings.copy_command.as_ref().map(|c| c.program()),
            Some("xclip")
        );
        assert!(settings.paste_command.is_none());
        assert_eq!(settings.timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn into_settings_empty_uses_default_address() {
        let settings = ServerConfig::empty().into_settings().unwrap();
        assert_eq!(settings.address, BindAddress::default());
    }

    #[test]
    fn into_settings_rejects_bad_values() {
        let bad_address = ServerConfig {
            address: Some("nope".to_string()),
            ..Default::default()
        };
        let err = bad_address.into_settings().unwrap_err();
        assert!(err.to_string().contains("address"));

        let bad_timeout = ServerConfig {
            timeout: Some("soon".to_string()),
            ..Default::default()
        };
        assert!(bad_timeout.into_settings().is_err());

        let blank_command = ServerConfig {
            paste_command: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank_command.into_settings().is_err());
    }

    #[test]
    fn blank_log_file_means_stderr() {
        let config = ServerConfig {
            log_file: Some(String::new()),
            ..Default::default()
        };
        assert!(config.into_settings().unwrap().log_file.is_none());
    }
}
