// ============================================
// File: crates/freia-core/src/crypto/mod.rs
// ============================================
//! # Cryptography Module
//!
//! ## Creation Reason
//! Centralizes all cryptographic operations of the Freia chat client,
//! using audited RustCrypto implementations.
//!
//! ## Main Functionality
//!
//! ### Submodules
//! - [`keys`]: `SymmetricKey`, the 256-bit key type
//! - [`kdf`]: Password-based key derivation (PBKDF2-HMAC-SHA256)
//! - [`cipher`]: `CryptoProvider` trait and AES-256-CBC implementation
//! - [`encoding`]: Base64 helpers
//!
//! ## Two Independent Keys
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  chat password ──► PBKDF2 ──► chatKey                       │
//! │      shared by chat peers; relay never sees the plaintext   │
//! │                                                             │
//! │  server password ──► PBKDF2 ──► transportKey                │
//! │      shared with the relay; protects the whole frame        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ciphertext Layout (both layers)
//! ```text
//! ┌────────────────┬──────────────────────────────┐
//! │ IV (16 bytes)  │ AES-256-CBC ciphertext, PKCS7│
//! └────────────────┴──────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - ALL implementations use RustCrypto (audited)
//! - NEVER roll your own crypto
//! - A fresh random IV is drawn for every encryption
//! - CBC is unauthenticated: a wrong key is only caught by bad padding,
//!   which is probabilistic. Callers must not treat successful decryption
//!   as proof of origin
//!
//! ## Last Modified
//! v0.1.0 - Initial crypto implementation

pub mod cipher;
pub mod encoding;
pub mod kdf;
pub mod keys;

// Re-export primary types at module level
pub use cipher::{CryptoProvider, Pbkdf2AesCrypto};
pub use keys::SymmetricKey;

// ============================================
// Constants
// ============================================

/// Size of an AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of the CBC initialization vector in bytes.
pub const IV_SIZE: usize = 16;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// PBKDF2 iteration count used for password stretching.
pub const PBKDF2_ROUNDS: u32 = 100_000;

/// PBKDF2 salt. Empty so every client derives the same key from the
/// same password without exchanging a salt.
pub const PBKDF2_SALT: &[u8] = b"";
