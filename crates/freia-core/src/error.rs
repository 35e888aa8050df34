// ============================================
// File: crates/freia-core/src/error.rs
// ============================================
//! # Core Error Types
//!
//! ## Creation Reason
//! Defines error types specific to key derivation, symmetric encryption
//! and PROT1 framing in the Freia core crate.
//!
//! ## Main Functionality
//! - `CoreError`: Primary error enum for crypto and framing operations
//! - `OutboundError`: Why an outgoing message could not be encoded
//! - `InboundError`: Why an incoming frame could not be decoded
//!
//! ## Error Categories
//! 1. **Crypto Errors**: Derivation, encryption, decryption failures
//! 2. **Framing Errors**: Bad frame length
//! 3. **Codec Outcomes**: `InboundError` / `OutboundError`, whose `Display`
//!    text is the exact line shown to the user in the message log
//!
//! ## ⚠️ Important Note for Next Developer
//! - NEVER include key material or plaintext in error messages
//! - Changing an `InboundError`/`OutboundError` message changes what the
//!   user sees in the chat log
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

// ============================================
// Result Type Alias
// ============================================

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

// ============================================
// CoreError
// ============================================

/// Core error types for cryptographic and framing operations.
///
/// # Security Note
/// Error messages are informative for debugging without revealing
/// key material, passwords or message contents.
#[derive(Error, Debug)]
pub enum CoreError {
    // ========================================
    // Cryptographic Errors
    // ========================================

    /// Encryption operation failed.
    #[error("Encryption failed: {context}")]
    Encryption {
        /// What was being encrypted
        context: String,
    },

    /// Decryption failed (short input, bad padding or wrong key).
    #[error("Decryption failed: {reason}")]
    Decryption {
        /// Why decryption failed
        reason: String,
    },

    /// Key derivation failed.
    #[error("Key derivation failed: {reason}")]
    KeyDerivation {
        /// Why derivation failed
        reason: String,
    },

    // ========================================
    // Framing Errors
    // ========================================

    /// Frame length prefix is zero or above the maximum.
    #[error("Invalid frame length: {length} (allowed 1..={max})")]
    InvalidFrameLength {
        /// Declared length
        length: u32,
        /// Maximum permitted length
        max: u32,
    },
}

impl CoreError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates an `Encryption` error.
    pub fn encryption(context: impl Into<String>) -> Self {
        Self::Encryption {
            context: context.into(),
        }
    }

    /// Creates a `Decryption` error.
    pub fn decryption(reason: impl Into<String>) -> Self {
        Self::Decryption {
            reason: reason.into(),
        }
    }

    /// Creates a `KeyDerivation` error.
    pub fn key_derivation(reason: impl Into<String>) -> Self {
        Self::KeyDerivation {
            reason: reason.into(),
        }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if the error means the byte stream can no longer be
    /// trusted and the connection carrying it must be dropped.
    #[must_use]
    pub const fn is_fatal_to_stream(&self) -> bool {
        matches!(self, Self::InvalidFrameLength { .. })
    }
}

// ============================================
// OutboundError
// ============================================

/// Failure while turning outgoing text into a wire frame.
///
/// A missing key is reported the same way as a failing cipher: in both
/// cases that layer could not be encrypted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundError {
    /// Chat-layer (end-to-end) encryption failed or no chat key is set.
    #[error("[Error] Chat encryption failed.")]
    ChatEncryption,

    /// Transport-layer (client to relay) encryption failed or no
    /// transport key is set.
    #[error("[Error] Server-layer encryption failed.")]
    TransportEncryption,

    /// The encrypted frame exceeds the maximum frame length.
    #[error("[Error] Message too large to send.")]
    FrameTooLarge,
}

// ============================================
// InboundError
// ============================================

/// Failure while turning a received frame into a chat line.
///
/// None of these end the connection; each is shown to the user as its
/// own log line and the receive loop carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InboundError {
    /// The frame did not decrypt under the transport key.
    #[error("[Decryption failed]")]
    DecryptFailed,

    /// The packet header has fewer than three fields.
    #[error("[Protocol error] malformed PROT1 header.")]
    MalformedHeader,

    /// The packet tag is not one this client understands.
    #[error("[Unknown protocol] {0}")]
    UnknownProtocol(String),

    /// The cipher length field is not a number, is zero, or exceeds the
    /// packet. `declared` is `None` when the field did not parse.
    #[error("{}", length_error_line(.declared))]
    LengthOutOfRange {
        /// Parsed length, if the field was numeric
        declared: Option<usize>,
    },

    /// The embedded ciphertext did not decrypt under the chat key.
    #[error("[Chat decryption failed]")]
    ChatDecryptFailed,
}

fn length_error_line(declared: &Option<usize>) -> &'static str {
    match declared {
        None => "[Protocol error] invalid length in PROT1.",
        Some(_) => "[Protocol error] PROT1 length out of range.",
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidFrameLength {
            length: 0,
            max: 10 * 1024 * 1024,
        };
        assert!(err.to_string().contains("10485760"));

        let err = CoreError::decryption("bad padding");
        assert!(err.to_string().contains("bad padding"));
    }

    #[test]
    fn test_error_classification() {
        let bad_len = CoreError::InvalidFrameLength { length: 0, max: 1 };
        assert!(bad_len.is_fatal_to_stream());
        assert!(!CoreError::decryption("x").is_fatal_to_stream());
    }

    #[test]
    fn test_codec_error_lines() {
        assert_eq!(
            OutboundError::ChatEncryption.to_string(),
            "[Error] Chat encryption failed."
        );
        assert_eq!(
            OutboundError::TransportEncryption.to_string(),
            "[Error] Server-layer encryption failed."
        );
        assert_eq!(
            OutboundError::FrameTooLarge.to_string(),
            "[Error] Message too large to send."
        );
        assert_eq!(
            InboundError::UnknownProtocol("PROT9".into()).to_string(),
            "[Unknown protocol] PROT9"
        );
        assert_eq!(
            InboundError::LengthOutOfRange { declared: None }.to_string(),
            "[Protocol error] invalid length in PROT1."
        );
        assert_eq!(
            InboundError::LengthOutOfRange { declared: Some(0) }.to_string(),
            "[Protocol error] PROT1 length out of range."
        );
    }
}
