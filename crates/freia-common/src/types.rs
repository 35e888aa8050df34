// ============================================
// File: crates/freia-common/src/types.rs
// ============================================
//! # Core Type Definitions
//!
//! ## Creation Reason
//! Centralizes the relay endpoint type so the client, the transport and
//! the command-line front end agree on how an address/port pair is held.
//!
//! ## Main Functionality
//! - `Endpoint`: Relay address plus TCP port
//!
//! ## Last Modified
//! v0.1.0 - Initial type definitions

use std::fmt;

use crate::error::{CommonError, Result};

// ============================================
// Endpoint
// ============================================

/// Address and port of the chat relay.
///
/// The address is kept as text: resolution happens at connect time in
/// the transport layer, not when the endpoint is configured.
///
/// # Example
/// ```
/// use freia_common::types::Endpoint;
///
/// let endpoint = Endpoint::parse("127.0.0.1", "9000").unwrap();
/// assert_eq!(endpoint.port(), 9000);
/// assert_eq!(endpoint.to_string(), "127.0.0.1:9000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    address: String,
    port: u16,
}

impl Endpoint {
    /// Creates an endpoint from an address and a numeric port.
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }

    /// Creates an endpoint from an address and a decimal port string.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the port is not a number in `1..=65535`.
    pub fn parse(address: impl Into<String>, port: &str) -> Result<Self> {
        let port: u16 = port
            .parse()
            .map_err(|_| CommonError::invalid_input("port", "must be a number in 1-65535"))?;
        if port == 0 {
            return Err(CommonError::invalid_input("port", "cannot be 0"));
        }
        Ok(Self::new(address, port))
    }

    /// Returns the address text.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the TCP port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

// ============================================
// Tests
// ============================================
