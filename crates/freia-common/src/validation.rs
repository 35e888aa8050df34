// ============================================
// File: crates/freia-common/src/validation.rs
// ============================================
//! # Input Validation
//!
//! ## Creation Reason
//! The connection manager must not derive keys or store settings until
//! the user-supplied strings are syntactically acceptable. The checks live
//! behind a trait so a front end can swap in its own rules.
//!
//! ## Main Functionality
//! - `Validator`: Trait returning a boolean verdict per field
//! - `DefaultValidator`: Dotted-quad IPv4, numeric port, bounded
//!   username and password lengths
//!
//! ## Rules (DefaultValidator)
//! | Field    | Rule                                              |
//! |----------|---------------------------------------------------|
//! | address  | digits and exactly three dots, parses as IPv4     |
//! | port     | digits only, value in 1..=65535                   |
//! | username | 1..=32 bytes, no newline                          |
//! | password | 1..=128 bytes                                     |
//!
//! ## ⚠️ Important Note for Next Developer
//! - The username travels inside the newline-delimited PROT1 header;
//!   a newline in it would shift every following field
//!
//! ## Last Modified
//! v0.1.0 - Initial validation rules

use std::net::Ipv4Addr;

// ============================================
// Constants
// ============================================

/// Maximum username length in bytes.
pub const MAX_USERNAME_LEN: usize = 32;

/// Maximum password length in bytes.
pub const MAX_PASSWORD_LEN: usize = 128;

// ============================================
// Validator Trait
// ============================================

/// Syntax checks for connection settings.
///
/// Implementations must be pure: no I/O, no side effects.
pub trait Validator: Send + Sync {
    /// Returns `true` if `address` is an acceptable relay address.
    fn is_valid_address(&self, address: &str) -> bool;

    /// Returns `true` if `port` is an acceptable decimal TCP port.
    fn is_valid_port(&self, port: &str) -> bool;

    /// Returns `true` if `username` may be sent in a packet header.
    fn is_valid_username(&self, username: &str) -> bool;

    /// Returns `true` if `password` may be used for key derivation.
    fn is_valid_password(&self, password: &str) -> bool;
}

// ============================================
// DefaultValidator
// ============================================

/// Validation rules used when no custom validator is supplied.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultValidator;

impl DefaultValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Validator for DefaultValidator {
    fn is_valid_address(&self, address: &str) -> bool {
        let mut dots = 0;
        for c in address.chars() {
            match c {
                '.' => dots += 1,
                c if c.is_ascii_digit() => {}
                _ => return false,
            }
        }
        if dots != 3 {
            return false;
        }
        address.parse::<Ipv4Addr>().is_ok()
    }

    fn is_valid_port(&self, port: &str) -> bool {
        if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        // Digit runs too long for u32 fail to parse and are rejected here.
        matches!(port.parse::<u32>(), Ok(p) if (1..=65535).contains(&p))
    }

    fn is_valid_username(&self, username: &str) -> bool {
        !username.is_empty() && username.len() <= MAX_USERNAME_LEN && !username.contains('\n')
    }

    fn is_valid_password(&self, password: &str) -> bool {
        !password.is_empty() && password.len() <= MAX_PASSWORD_LEN
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_rules() {
        let v = DefaultValidator::new();
        assert!(v.is_valid_address("127.0.0.1"));
        assert!(v.is_valid_address("192.168.100.254"));

        assert!(!v.is_valid_address(""));
        assert!(!v.is_valid_address("localhost"));
        assert!(!v.is_valid_address("10.0.0"));
        assert!(!v.is_valid_address("10.0.0.1.5"));
        assert!(!v.is_valid_address("256.1.1.1"));
        assert!(!v.is_valid_address("::1"));
        assert!(!v.is_valid_address(" 10.0.0.1"));
    }

    #[test]
    fn test_port_rules() {
        let v = DefaultValidator::new();
        assert!(v.is_valid_port("1"));
        assert!(v.is_valid_port("9000"));
        assert!(v.is_valid_port("65535"));

        assert!(!v.is_valid_port(""));
        assert!(!v.is_valid_port("0"));
        assert!(!v.is_valid_port("65536"));
        assert!(!v.is_valid_port("-1"));
        assert!(!v.is_valid_port("80a"));
        assert!(!v.is_valid_port("99999999999"));
    }

    #[test]
    fn test_username_rules() {
        let v = DefaultValidator::new();
        assert!(v.is_valid_username("alice"));
        assert!(v.is_valid_username(&"a".repeat(MAX_USERNAME_LEN)));

        assert!(!v.is_valid_username(""));
        assert!(!v.is_valid_username(&"a".repeat(MAX_USERNAME_LEN + 1)));
        assert!(!v.is_valid_username("bob\nPROT1"));
    }

    #[test]
    fn test_password_rules() {
        let v = DefaultValidator::new();
        assert!(v.is_valid_password("pw"));
        assert!(v.is_valid_password(&"p".repeat(MAX_PASSWORD_LEN)));

        assert!(!v.is_valid_password(""));
        assert!(!v.is_valid_password(&"p".repeat(MAX_PASSWORD_LEN + 1)));
    }
}
