// ============================================
// File: crates/freia-client/src/error.rs
// ============================================
//! # Client Error Types
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

use freia_core::error::CoreError;
use freia_transport::error::TransportError;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client error types.
///
/// The public `ConnectionManager` surface reports booleans and log lines;
/// these errors carry the detail to the tracing output and to the CLI.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The configuration file could not be read or parsed.
    #[error("Failed to load configuration from '{path}': {reason}")]
    ConfigLoad {
        /// File that was being loaded
        path: String,
        /// Read or parse failure
        reason: String,
    },

    /// A configuration value was rejected.
    #[error("Invalid configuration: {field} - {reason}")]
    ConfigInvalid {
        /// Dotted path of the offending key
        field: String,
        /// What the key must look like
        reason: String,
    },

    /// `connect` was called without complete credentials.
    #[error("Client is not configured")]
    NotConfigured,

    /// `connect` was called while a connection is open.
    #[error("Client is already connected")]
    AlreadyConnected,

    /// The receive thread could not be started.
    #[error("Failed to spawn receive worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// Key derivation failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Opening or using the socket failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ClientError {
    /// Creates a `ConfigLoad` error.
    pub fn config_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `ConfigInvalid` error.
    pub fn config_invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for configuration file errors.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigLoad { .. } | Self::ConfigInvalid { .. })
    }

    /// Names the step that failed while connecting.
    #[must_use]
    pub const fn step(&self) -> &'static str {
        match self {
            Self::NotConfigured => "configuration",
            Self::AlreadyConnected => "state check",
            Self::WorkerSpawn(_) => "worker spawn",
            Self::Transport(e) => e.step(),
            Self::ConfigLoad { .. } | Self::ConfigInvalid { .. } | Self::Core(_) => "client",
        }
    }
}
