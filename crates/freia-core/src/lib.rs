// ============================================
// File: crates/freia-core/src/lib.rs
// ============================================
//! # Freia Core - Protocol & Cryptography Library
//!
//! ## Creation Reason
//! Provides the cryptographic operations and the wire protocol of the
//! Freia chat client. Everything here is pure: no sockets, no threads.
//!
//! ## Main Functionality
//!
//! ### Crypto Module ([`crypto`])
//! - `SymmetricKey` (zeroized, redacted, constant-time compared)
//! - PBKDF2-HMAC-SHA256 key derivation
//! - AES-256-CBC with a random IV per message
//! - Base64 helpers
//!
//! ### Protocol Module ([`protocol`])
//! - Length-prefixed frames
//! - PROT1 packets
//! - `ChatCodec` for both encoding directions
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              freia-client                           │
//! │                    │                                │
//! │         ┌──────────┴──────────┐                     │
//! │         │                     ▼                     │
//! │         │              freia-transport              │
//! │         ▼                     │                     │
//! │    freia-core  ◄──────────────┘                     │
//! │   You are here                                      │
//! │         │                                           │
//! │         ▼                                           │
//! │              freia-common                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Properties
//! - **Confidentiality**: two independent AES-256 layers
//! - **No integrity**: CBC without a MAC; tampering is only detected when
//!   it breaks padding or the PROT1 header
//!
//! ## ⚠️ Important Note for Next Developer
//! - ALL cryptographic code uses RustCrypto implementations
//! - NEVER implement custom crypto primitives
//! - ALL keys MUST implement Zeroize
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod crypto;
pub mod error;
pub mod protocol;

// Re-export commonly used items
pub use crypto::{CryptoProvider, Pbkdf2AesCrypto, SymmetricKey};
pub use error::{CoreError, InboundError, OutboundError, Result};
pub use protocol::{ChatCodec, Packet, MAX_FRAME_LEN};
