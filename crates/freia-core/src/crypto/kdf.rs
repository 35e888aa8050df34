// ============================================
// File: crates/freia-core/src/crypto/kdf.rs
// ============================================
//! # Key Derivation Functions
//!
//! ## Creation Reason
//! Both chat keys are shared secrets typed in by people. They are
//! stretched with PBKDF2-HMAC-SHA256 so that guessing a password costs
//! `rounds` HMAC evaluations per guess.
//!
//! ## Main Functionality
//! - `derive_key`: Password → 256-bit `SymmetricKey`
//!
//! ## Parameters
//! | Parameter | Value |
//! |-----------|-------|
//! | PRF       | HMAC-SHA256 |
//! | Rounds    | 100 000 (`PBKDF2_ROUNDS`) |
//! | Salt      | empty |
//! | Output    | 32 bytes |
//!
//! ## ⚠️ Important Note for Next Developer
//! - Changing rounds or salt changes every derived key; peers running
//!   the old parameters will no longer decrypt each other
//!
//! ## Last Modified
//! v0.1.0 - Initial PBKDF2 derivation

use hmac::Hmac;
use sha2::Sha256;
use tracing::debug;
use zeroize::Zeroizing;

use super::{SymmetricKey, KEY_SIZE, PBKDF2_SALT};
use crate::error::{CoreError, Result};

type PbkdfSha256Hmac = Hmac<Sha256>;

// ============================================
// Key Derivation
// ============================================

/// Derives a 256-bit key from a password.
///
/// # Arguments
/// * `password` - Non-empty password text
/// * `rounds` - PBKDF2 iteration count
///
/// # Returns
/// The same key for the same `(password, rounds)`, on every platform.
///
/// # Errors
/// - `KeyDerivation` if the password is empty or `rounds` is zero
pub fn derive_key(password: &str, rounds: u32) -> Result<SymmetricKey> {
    if password.is_empty() {
        return Err(CoreError::key_derivation("password is empty"));
    }
    if rounds == 0 {
        return Err(CoreError::key_derivation("round count must be positive"));
    }

    let key_bytes = Zeroizing::new(
        pbkdf2::pbkdf2_array::<PbkdfSha256Hmac, KEY_SIZE>(
            password.as_bytes(),
            PBKDF2_SALT,
            rounds,
        )
        .map_err(|_| CoreError::key_derivation("PBKDF2 output length rejected"))?,
    );

    debug!(rounds, "Derived symmetric key from password");
    Ok(SymmetricKey::from_bytes(*key_bytes))
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_ROUNDS: u32 = 1_000;

    #[test]
    fn test_derive_key_deterministic() {
        let key1 = derive_key("correct horse", TEST_ROUNDS).unwrap();
        let key2 = derive_key("correct horse", TEST_ROUNDS).unwrap();
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_derive_key_different_passwords() {
        let key1 = derive_key("pw1", TEST_ROUNDS).unwrap();
        let key2 = derive_key("pw2", TEST_ROUNDS).unwrap();
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_derive_key_rounds_matter() {
        let key1 = derive_key("pw", TEST_ROUNDS).unwrap();
        let key2 = derive_key("pw", TEST_ROUNDS + 1).unwrap();
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_derive_key_rejects_empty_password() {
        let result = derive_key("", TEST_ROUNDS);
        assert!(matches!(result, Err(CoreError::KeyDerivation { .. })));
    }

    #[test]
    fn test_derive_key_rejects_zero_rounds() {
        assert!(derive_key("pw", 0).is_err());
    }

    #[test]
    fn test_derive_key_known_vector() {
        // PBKDF2-HMAC-SHA256("password", salt = "", c = 1, dkLen = 32)
        let key = derive_key("password", 1).unwrap();
        let expected = [
            0xc1, 0x23, 0x2f, 0x10, 0xf6, 0x27, 0x15, 0xfd, 0xa0, 0x6a, 0xe7, 0xc0, 0xa2, 0x03,
            0x7c, 0xa1, 0x9b, 0x33, 0xcf, 0x10, 0x3b, 0x72, 0x7b, 0xa5, 0x6d, 0x87, 0x0c, 0x11,
            0xf2, 0x90, 0xa2, 0xab,
        ];
        assert_eq!(key.as_bytes(), &expected);
    }
}
