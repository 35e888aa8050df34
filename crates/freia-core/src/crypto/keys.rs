// ============================================
// File: crates/freia-core/src/crypto/keys.rs
// ============================================
//! # Cryptographic Key Types
//!
//! ## Creation Reason
//! Defines the symmetric key used for both the chat layer and the
//! transport layer, with proper security properties (zeroize on drop,
//! constant-time comparison, redacted debug output).
//!
//! ## Key Lifecycle
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  SymmetricKey                                              │
//! │  ├─ Derived from a password at configure time              │
//! │  ├─ Immutable until the next successful configure          │
//! │  └─ Zeroed when replaced or when the client is dropped     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Key types MUST implement Zeroize
//! - Keys should NEVER be logged
//!
//! ## Last Modified
//! v0.1.0 - Initial key type definitions

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::KEY_SIZE;

// ============================================
// SymmetricKey
// ============================================

/// 256-bit symmetric key for AES-256-CBC.
///
/// # Security
/// - Zeroed on drop
/// - `Debug` never prints key bytes
/// - Equality is constant-time
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl SymmetricKey {
    /// Creates a key from raw bytes.
    ///
    /// # Arguments
    /// * `bytes` - 32-byte key material
    #[must_use]
    pub const fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the raw key bytes.
    ///
    /// # Security Warning
    /// Do not log or store the returned bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymmetricKey([REDACTED])")
    }
}

impl PartialEq for SymmetricKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for SymmetricKey {}

// ============================================
// Tests
// ============================================
