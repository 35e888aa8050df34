// ============================================
// File: crates/freia-client/src/config.rs
// ============================================
//! # Client Configuration
//!
//! ## Creation Reason
//! Lets the command-line client keep a connection profile in a TOML
//! file. The library itself is configured only through
//! `ConnectionManager::configure`.
//!
//! ## Main Functionality
//! - `ClientConfig`: Main configuration structure
//! - TOML file loading and parsing
//! - Configuration validation
//! - Command-line overrides
//!
//! ## Configuration Sections
//! - `server`: Relay address and port
//! - `identity`: Username
//! - `connection`: Connect timeout, log polling interval
//! - `logging`: Log level
//!
//! ## Example Configuration
//! ```toml
//! [server]
//! address = "127.0.0.1"
//! port = "9000"
//!
//! [identity]
//! username = "alice"
//!
//! [connection]
//! connect_timeout_secs = 3
//! poll_interval_ms = 100
//!
//! [logging]
//! level = "info"
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Passwords are NEVER read from this file; they come from flags or
//!   environment variables
//! - The port stays a string so the same validator sees it as the
//!   library's `configure` does
//!
//! ## Last Modified
//! v0.1.0 - Initial configuration implementation

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use freia_common::{DefaultValidator, Validator};

use crate::connection::ConnectOptions;
use crate::error::{ClientError, Result};

// ============================================
// ClientConfig
// ============================================

/// Main client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Relay server location.
    #[serde(default)]
    pub server: ServerSection,

    /// Local identity.
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Connection tuning.
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    /// Returns error if file cannot be read, parsed or validated.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        info!("Loading configuration from: {}", path_str);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ClientError::config_load(&path_str, e.to_string()))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ClientError::config_load(&path_str, e.to_string()))?;

        config.validate()?;

        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Loads configuration from a string (useful for testing).
    ///
    /// # Errors
    /// Returns error if the text cannot be parsed or validated.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ClientError::config_load("<string>", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns `ConfigInvalid` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let validator = DefaultValidator::new();
        self.server.validate(&validator)?;
        self.identity.validate(&validator)?;
        self.connection.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Applies command-line overrides on top of file values.
    pub fn apply_overrides(
        &mut self,
        address: Option<String>,
        port: Option<String>,
        username: Option<String>,
    ) {
        if let Some(address) = address {
            self.server.address = address;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        if let Some(username) = username {
            self.identity.username = Some(username);
        }
    }

    /// Serializes configuration to TOML string.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Returns the options for `ConnectionManager::with_options`.
    #[must_use]
    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            connect_timeout: Duration::from_secs(self.connection.connect_timeout_secs),
        }
    }

    /// Returns how often the chat loop polls the message log.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.connection.poll_interval_ms)
    }
}

// ============================================
// ServerSection
// ============================================

/// Relay server section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSection {
    /// Dotted-quad IPv4 address of the relay.
    #[serde(default = "default_address")]
    pub address: String,

    /// Relay TCP port, as decimal text.
    #[serde(default = "default_port")]
    pub port: String,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> String {
    "9000".to_string()
}

impl ServerSection {
    fn validate(&self, validator: &dyn Validator) -> Result<()> {
        if !validator.is_valid_address(&self.address) {
            return Err(ClientError::config_invalid(
                "server.address",
                "must be a dotted-quad IPv4 address",
            ));
        }
        if !validator.is_valid_port(&self.port) {
            return Err(ClientError::config_invalid(
                "server.port",
                "must be a number in 1-65535",
            ));
        }
        Ok(())
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

// ============================================
// IdentityConfig
// ============================================

/// Identity section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Username shown to chat peers.
    #[serde(default)]
    pub username: Option<String>,
}

impl IdentityConfig {
    fn validate(&self, validator: &dyn Validator) -> Result<()> {
        match &self.username {
            Some(name) if !validator.is_valid_username(name) => Err(ClientError::config_invalid(
                "identity.username",
                "must be 1-32 bytes without newlines",
            )),
            _ => Ok(()),
        }
    }
}

// ============================================
// ConnectionConfig
// ============================================

/// Connection tuning section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Bound on the connect attempt, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Interval between message log polls, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_connect_timeout_secs() -> u64 {
    3
}

fn default_poll_interval_ms() -> u64 {
    100
}

impl ConnectionConfig {
    fn validate(&self) -> Result<()> {
        if self.connect_timeout_secs == 0 {
            return Err(ClientError::config_invalid(
                "connection.connect_timeout_secs",
                "cannot be 0",
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(ClientError::config_invalid(
                "connection.poll_interval_ms",
                "cannot be 0",
            ));
        }
        Ok(())
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

// ============================================
// LoggingConfig
// ============================================

/// Logging configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ClientError::config_invalid(
                "logging.level",
                "must be one of trace, debug, info, warn, error",
            )),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.connect_options(), ConnectOptions::default());
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_full_config_format() {
        let toml = r#"
            [server]
            address = "192.168.1.20"
            port = "9100"

            [identity]
            username = "alice"

            [connection]
            connect_timeout_secs = 5
            poll_interval_ms = 250

            [logging]
            level = "debug"
        "#;

        let config = ClientConfig::from_str(toml).unwrap();
        assert_eq!(config.server.address, "192.168.1.20");
        assert_eq!(config.server.port, "9100");
        assert_eq!(config.identity.username.as_deref(), Some("alice"));
        assert_eq!(config.connect_options().connect_timeout, Duration::from_secs(5));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = ClientConfig::from_str("[identity]\nusername = \"bob\"\n").unwrap();
        assert_eq!(config.server, ServerSection::default());
        assert_eq!(config.connection, ConnectionConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            "[server]\naddress = \"relay.example\"\n",
            "[server]\nport = \"0\"\n",
            "[identity]\nusername = \"\"\n",
            "[connection]\npoll_interval_ms = 0\n",
            "[logging]\nlevel = \"loud\"\n",
        ];
        for toml in cases {
            let err = ClientConfig::from_str(toml).unwrap_err();
            assert!(err.is_config_error(), "{toml}");
        }
    }

    #[test]
    fn test_unparsable_toml() {
        let err = ClientConfig::from_str("[server\naddress = 1").unwrap_err();
        assert!(matches!(err, ClientError::ConfigLoad { .. }));
    }

    #[test]
    fn test_overrides() {
        let mut config = ClientConfig::default();
        config.apply_overrides(None, Some("9200".into()), Some("carol".into()));
        assert_eq!(config.server.address, "127.0.0.1");
        assert_eq!(config.server.port, "9200");
        assert_eq!(config.identity.username.as_deref(), Some("carol"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = ClientConfig::default();
        config.identity.username = Some("dave".into());
        let parsed = ClientConfig::from_str(&config.to_toml()).unwrap();
        assert_eq!(parsed, config);
    }
}
