// ============================================
// File: crates/freia-core/src/protocol/packet.rs
// ============================================
//! # PROT1 Packet
//!
//! ## Creation Reason
//! Defines the logical unit carried inside one decrypted frame: a short
//! text header naming the sender, followed by the chat-layer ciphertext.
//!
//! ## Packet Format
//! ```text
//! "PROT1" '\n' username '\n' decimal(cipher_len) '\n' <cipher bytes>
//! ```
//! The ciphertext is always the LAST `cipher_len` bytes of the packet.
//! The header's own length is not recorded, and the ciphertext may itself
//! contain newline bytes, so the split point is `len - cipher_len`.
//!
//! ## Parsing Steps
//! 1. Split on `\n` (a trailing empty segment is not a field)
//! 2. Require at least 3 fields
//! 3. Require tag `PROT1`
//! 4. Parse the length field as ASCII decimal, `1..=packet.len()`
//!
//! ## Last Modified
//! v0.1.0 - Initial PROT1 definitions

use std::borrow::Cow;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::InboundError;

// ============================================
// Constants
// ============================================

/// Tag of the only packet format this client speaks.
pub const PROTOCOL_TAG: &str = "PROT1";

/// Header field separator.
pub const FIELD_SEPARATOR: u8 = b'\n';

// ============================================
// Packet
// ============================================

/// A parsed PROT1 packet borrowing from the decrypted frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet<'a> {
    /// Sender username as written by the peer.
    pub sender: Cow<'a, str>,
    /// Chat-layer ciphertext (`iv || cbc_ciphertext`).
    pub cipher: &'a [u8],
}

impl<'a> Packet<'a> {
    /// Builds the packet bytes for an outgoing message.
    ///
    /// # Arguments
    /// * `username` - Sender name; must not contain `\n`
    /// * `cipher` - Chat-layer ciphertext
    #[must_use]
    pub fn build(username: &str, cipher: &[u8]) -> Bytes {
        let header = format!("{PROTOCOL_TAG}\n{username}\n{}\n", cipher.len());

        let mut buf = BytesMut::with_capacity(header.len() + cipher.len());
        buf.put_slice(header.as_bytes());
        buf.put_slice(cipher);
        buf.freeze()
    }

    /// Parses a decrypted frame into its sender and ciphertext.
    ///
    /// # Errors
    /// - `MalformedHeader`: fewer than three fields
    /// - `UnknownProtocol`: tag other than `PROT1`
    /// - `LengthOutOfRange`: length field not decimal, zero, or larger
    ///   than the packet
    pub fn parse(packet: &'a [u8]) -> Result<Self, InboundError> {
        let mut fields = packet.split(|b| *b == FIELD_SEPARATOR);
        let (Some(tag), Some(sender), Some(length_field)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(InboundError::MalformedHeader);
        };

        // "PROT1\nbob\n" splits into three segments, the last one empty.
        let has_more = fields.next().is_some();
        if !has_more && length_field.is_empty() {
            return Err(InboundError::MalformedHeader);
        }

        if tag != PROTOCOL_TAG.as_bytes() {
            return Err(InboundError::UnknownProtocol(
                String::from_utf8_lossy(tag).into_owned(),
            ));
        }

        let declared =
            parse_decimal(length_field).ok_or(InboundError::LengthOutOfRange { declared: None })?;
        if declared == 0 || declared > packet.len() {
            return Err(InboundError::LengthOutOfRange {
                declared: Some(declared),
            });
        }

        Ok(Self {
            sender: String::from_utf8_lossy(sender),
            cipher: &packet[packet.len() - declared..],
        })
    }
}

fn parse_decimal(field: &[u8]) -> Option<usize> {
    if field.is_empty() || !field.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(field).ok()?.parse().ok()
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_layout() {
        let packet = Packet::build("alice", &[0xFF; 32]);
        assert!(packet.starts_with(b"PROT1\nalice\n32\n"));
        assert_eq!(packet.len(), b"PROT1\nalice\n32\n".len() + 32);
    }

    #[test]
    fn test_parse_takes_trailing_bytes() {
        let packet = Packet::build("bob", b"0123456789ab");
        let parsed = Packet::parse(&packet).unwrap();
        assert_eq!(parsed.sender, "bob");
        assert_eq!(parsed.cipher, b"0123456789ab");
    }

    #[test]
    fn test_parse_cipher_with_newlines() {
        let cipher = b"\nab\n\ncd\n";
        let packet = Packet::build("bob", cipher);
        let parsed = Packet::parse(&packet).unwrap();
        assert_eq!(parsed.cipher, cipher);
    }

    #[test]
    fn test_parse_too_few_fields() {
        assert_eq!(Packet::parse(b""), Err(InboundError::MalformedHeader));
        assert_eq!(Packet::parse(b"PROT1"), Err(InboundError::MalformedHeader));
        assert_eq!(
            Packet::parse(b"PROT1\nbob\n"),
            Err(InboundError::MalformedHeader)
        );
    }

    #[test]
    fn test_parse_unknown_tag() {
        assert_eq!(
            Packet::parse(b"PROT2\nbob\n3\nabc"),
            Err(InboundError::UnknownProtocol("PROT2".into()))
        );
    }

    #[test]
    fn test_parse_bad_length_field() {
        assert_eq!(
            Packet::parse(b"PROT1\nbob\nx1\nabc"),
            Err(InboundError::LengthOutOfRange { declared: None })
        );
        assert_eq!(
            Packet::parse(b"PROT1\nbob\n-3\nabc"),
            Err(InboundError::LengthOutOfRange { declared: None })
        );
        assert_eq!(
            Packet::parse(b"PROT1\nbob\n\nabc"),
            Err(InboundError::LengthOutOfRange { declared: None })
        );
    }

    #[test]
    fn test_parse_length_out_of_range() {
        assert_eq!(
            Packet::parse(b"PROT1\nbob\n0\nabc"),
            Err(InboundError::LengthOutOfRange { declared: Some(0) })
        );
        assert_eq!(
            Packet::parse(b"PROT1\nbob\n999\nabc"),
            Err(InboundError::LengthOutOfRange {
                declared: Some(999)
            })
        );
    }

    #[test]
    fn test_parse_length_may_cover_header() {
        // Only the upper bound is the whole packet.
        let packet = b"PROT1\nbob\n3\nabc";
        let parsed = Packet::parse(packet).unwrap();
        assert_eq!(parsed.cipher, b"abc");

        let whole = Packet::parse(b"PROT1\nb\n11\n").unwrap();
        assert_eq!(whole.cipher, b"PROT1\nb\n11\n");
    }
}
