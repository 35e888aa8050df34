// ============================================
// File: crates/freia-common/src/error.rs
// ============================================
//! # Common Error Types
//!
//! ## Creation Reason
//! Errors raised by the shared helpers in this crate, wrapped by every
//! other Freia error enum.
//!
//! ## Main Functionality
//! - `CommonError`: Bad caller input and undecodable text
//! - `Result<T>`: Type alias using `CommonError`
//!
//! ## ⚠️ Important Note for Next Developer
//! - Never include passwords, keys or message text in error messages
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

/// Result alias for the shared helpers.
pub type Result<T> = std::result::Result<T, CommonError>;

// ============================================
// CommonError
// ============================================

/// Errors from endpoint parsing and text decoding.
///
/// # Example
/// ```
/// use freia_common::error::{CommonError, Result};
///
/// fn require_username(user: &str) -> Result<()> {
///     if user.is_empty() {
///         return Err(CommonError::invalid_input("username", "cannot be empty"));
///     }
///     Ok(())
/// }
///
/// assert!(require_username("").is_err());
/// ```
#[derive(Error, Debug)]
pub enum CommonError {
    /// A field supplied by the caller was rejected.
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// Field name as the caller knows it
        field: String,
        /// Why it was rejected
        reason: String,
    },

    /// Text could not be decoded.
    #[error("Cannot decode {context}: {details}")]
    Decoding {
        /// What was being decoded
        context: String,
        /// Decoder message
        details: String,
    },
}

impl CommonError {
    /// Creates an `InvalidInput` error.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the offending field for `InvalidInput`.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { field, .. } => Some(field),
            Self::Decoding { .. } => None,
        }
    }
}

impl From<base64::DecodeError> for CommonError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Decoding {
            context: "base64 text".into(),
            details: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_field() {
        let err = CommonError::invalid_input("port", "must be numeric");
        assert_eq!(err.to_string(), "Invalid port: must be numeric");
        assert_eq!(err.field(), Some("port"));
    }

    #[test]
    fn test_base64_conversion() {
        let err: CommonError = base64::DecodeError::InvalidLength(3).into();
        assert!(matches!(err, CommonError::Decoding { .. }));
        assert_eq!(err.field(), None);
    }
}
