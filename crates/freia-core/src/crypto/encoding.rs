// ============================================
// File: crates/freia-core/src/crypto/encoding.rs
// ============================================
//! # Text Encoding Helpers
//!
//! ## Creation Reason
//! Ciphertext travels as raw bytes inside frames, but tools and tests
//! sometimes need it as text. These helpers wrap the standard base64
//! alphabet (with padding) behind the common error type.
//!
//! ## Last Modified
//! v0.1.0 - Initial base64 helpers

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use freia_common::error::{CommonError, Result};

/// Encodes bytes as standard, padded base64.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes standard, padded base64 text.
///
/// # Errors
/// - `CommonError::Decoding` if the input is not valid base64
pub fn decode_base64(text: &str) -> Result<Vec<u8>> {
    STANDARD.decode(text.trim()).map_err(CommonError::from)
}
