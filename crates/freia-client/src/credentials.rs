// ============================================
// File: crates/freia-client/src/credentials.rs
// ============================================
//! # Session Credentials
//!
//! ## Creation Reason
//! Holds what a successful `configure` produced: where to connect, who
//! we are, and the two derived keys. Passwords are never stored.
//!
//! ## Key Slots
//! ```text
//! chat_key       end-to-end, shared with chat peers
//! transport_key  client ↔ relay
//! ```
//! Each slot is an `Option`; `None` is the "absent" flag.
//!
//! ## Last Modified
//! v0.1.0 - Initial credentials

use freia_common::Endpoint;
use freia_core::SymmetricKey;

/// Connection target, identity and derived keys.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    endpoint: Option<Endpoint>,
    username: String,
    chat_key: Option<SymmetricKey>,
    transport_key: Option<SymmetricKey>,
}

impl Credentials {
    /// Creates a complete set of credentials.
    #[must_use]
    pub fn new(
        endpoint: Endpoint,
        username: impl Into<String>,
        chat_key: SymmetricKey,
        transport_key: SymmetricKey,
    ) -> Self {
        Self {
            endpoint: Some(endpoint),
            username: username.into(),
            chat_key: Some(chat_key),
            transport_key: Some(transport_key),
        }
    }

    /// Returns the relay endpoint, if configured.
    #[must_use]
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    /// Returns the username (empty until configured).
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the chat key, if present.
    #[must_use]
    pub fn chat_key(&self) -> Option<&SymmetricKey> {
        self.chat_key.as_ref()
    }

    /// Returns the transport key, if present.
    #[must_use]
    pub fn transport_key(&self) -> Option<&SymmetricKey> {
        self.transport_key.as_ref()
    }

    /// Returns `true` if an endpoint and both keys are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.endpoint.is_some() && self.chat_key.is_some() && self.transport_key.is_some()
    }

    #[cfg(test)]
    pub(crate) fn clear_chat_key(&mut self) {
        self.chat_key = None;
    }

    #[cfg(test)]
    pub(crate) fn clear_transport_key(&mut self) {
        self.transport_key = None;
    }
}
