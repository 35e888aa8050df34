// ============================================
// File: crates/freia-core/src/protocol/codec.rs
// ============================================
//! # Chat Codec
//!
//! ## Creation Reason
//! Turns chat text into wire frames and wire frames back into display
//! lines, applying both encryption layers in the right order.
//!
//! ## Main Functionality
//! - `ChatCodec::encode_outbound`: text → length-prefixed frame
//! - `ChatCodec::decode_inbound`: frame payload → `"sender: text"`
//!
//! ## Layering
//! ```text
//! text ─► encrypt(chatKey) ─► PROT1 packet ─► encrypt(transportKey) ─► frame
//! frame ─► decrypt(transportKey) ─► PROT1 packet ─► decrypt(chatKey) ─► text
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Decode errors are values, not failures of the connection; the caller
//!   logs the `Display` line and keeps reading
//! - The codec holds no key; keys are passed per call
//!
//! ## Last Modified
//! v0.1.0 - Initial codec implementation

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::crypto::{CryptoProvider, SymmetricKey};
use crate::error::{InboundError, OutboundError};
use crate::protocol::frame::encode_frame;
use crate::protocol::packet::Packet;

// ============================================
// ChatCodec
// ============================================

/// Encoder/decoder for the two-layer chat protocol.
#[derive(Clone)]
pub struct ChatCodec {
    crypto: Arc<dyn CryptoProvider>,
}

impl ChatCodec {
    /// Creates a codec over the given crypto provider.
    #[must_use]
    pub fn new(crypto: Arc<dyn CryptoProvider>) -> Self {
        Self { crypto }
    }

    /// Returns the crypto provider used by this codec.
    #[must_use]
    pub fn crypto(&self) -> &Arc<dyn CryptoProvider> {
        &self.crypto
    }

    /// Encodes outgoing text into a complete wire frame.
    ///
    /// # Arguments
    /// * `text` - Message text
    /// * `username` - Sender name placed in the packet header
    /// * `chat_key` - End-to-end key, `None` if not configured
    /// * `transport_key` - Relay key, `None` if not configured
    ///
    /// # Returns
    /// `u32_be(len) || iv || ciphertext`, ready for a single socket write.
    ///
    /// # Errors
    /// - `ChatEncryption`: chat key missing or chat-layer encryption failed
    /// - `TransportEncryption`: transport key missing or encryption failed
    /// - `FrameTooLarge`: the frame would exceed the maximum length
    pub fn encode_outbound(
        &self,
        text: &str,
        username: &str,
        chat_key: Option<&SymmetricKey>,
        transport_key: Option<&SymmetricKey>,
    ) -> Result<Bytes, OutboundError> {
        let chat_key = chat_key.ok_or(OutboundError::ChatEncryption)?;
        let chat_cipher = self
            .crypto
            .encrypt(text.as_bytes(), chat_key)
            .map_err(|e| {
                debug!(error = %e, "Chat-layer encryption failed");
                OutboundError::ChatEncryption
            })?;
        if chat_cipher.is_empty() {
            return Err(OutboundError::ChatEncryption);
        }

        let packet = Packet::build(username, &chat_cipher);

        let transport_key = transport_key.ok_or(OutboundError::TransportEncryption)?;
        let transport_cipher = self
            .crypto
            .encrypt(&packet, transport_key)
            .map_err(|e| {
                debug!(error = %e, "Transport-layer encryption failed");
                OutboundError::TransportEncryption
            })?;
        if transport_cipher.is_empty() {
            return Err(OutboundError::TransportEncryption);
        }

        let frame = encode_frame(&transport_cipher).map_err(|e| {
            debug!(error = %e, "Outbound frame rejected");
            OutboundError::FrameTooLarge
        })?;

        trace!(frame_len = frame.len(), "Encoded outbound frame");
        Ok(frame)
    }

    /// Decodes a frame payload (without its length prefix) into a
    /// display line.
    ///
    /// # Arguments
    /// * `payload` - Transport ciphertext as read from the wire
    /// * `transport_key` - Relay key
    /// * `chat_key` - End-to-end key, `None` if not configured
    ///
    /// # Returns
    /// `"<sender>: <text>"` on success.
    ///
    /// # Errors
    /// One `InboundError` per failure kind; its `Display` text is the line
    /// to show the user.
    pub fn decode_inbound(
        &self,
        payload: &[u8],
        transport_key: &SymmetricKey,
        chat_key: Option<&SymmetricKey>,
    ) -> Result<String, InboundError> {
        let packet = match self.crypto.decrypt(payload, transport_key) {
            Ok(packet) if !packet.is_empty() => packet,
            Ok(_) => return Err(InboundError::DecryptFailed),
            Err(e) => {
                debug!(error = %e, "Transport-layer decryption failed");
                return Err(InboundError::DecryptFailed);
            }
        };

        let parsed = Packet::parse(&packet)?;

        let chat_key = chat_key.ok_or(InboundError::ChatDecryptFailed)?;
        let text = match self.crypto.decrypt(parsed.cipher, chat_key) {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => return Err(InboundError::ChatDecryptFailed),
            Err(e) => {
                debug!(error = %e, "Chat-layer decryption failed");
                return Err(InboundError::ChatDecryptFailed);
            }
        };

        Ok(format!(
            "{}: {}",
            parsed.sender,
            String::from_utf8_lossy(&text)
        ))
    }
}

impl fmt::Debug for ChatCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCodec").finish_non_exhaustive()
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::cipher;
    use crate::crypto::Pbkdf2AesCrypto;
    use crate::error::{CoreError, Result};
    use crate::protocol::frame::{decode_length_prefix, LENGTH_PREFIX_SIZE};

    fn codec() -> ChatCodec {
        ChatCodec::new(Arc::new(Pbkdf2AesCrypto::with_rounds(10)))
    }

    fn keys() -> (SymmetricKey, SymmetricKey) {
        let crypto = Pbkdf2AesCrypto::with_rounds(10);
        (
            crypto.derive_key("pw1").unwrap(),
            crypto.derive_key("pw2").unwrap(),
        )
    }

    fn payload_of(frame: &[u8]) -> &[u8] {
        let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
        prefix.copy_from_slice(&frame[..LENGTH_PREFIX_SIZE]);
        let len = decode_length_prefix(prefix) as usize;
        assert_eq!(frame.len(), LENGTH_PREFIX_SIZE + len);
        &frame[LENGTH_PREFIX_SIZE..]
    }

    /// Provider whose encryption always fails.
    struct BrokenCipher;

    impl CryptoProvider for BrokenCipher {
        fn derive_key(&self, _password: &str) -> Result<SymmetricKey> {
            Ok(SymmetricKey::from_bytes([0; 32]))
        }

        fn encrypt(&self, _plaintext: &[u8], _key: &SymmetricKey) -> Result<Vec<u8>> {
            Err(CoreError::encryption("broken"))
        }

        fn decrypt(&self, _blob: &[u8], _key: &SymmetricKey) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_outbound_inbound_roundtrip() {
        let codec = codec();
        let (chat, transport) = keys();

        let frame = codec
            .encode_outbound("hello there", "bob", Some(&chat), Some(&transport))
            .unwrap();
        let line = codec
            .decode_inbound(payload_of(&frame), &transport, Some(&chat))
            .unwrap();

        assert_eq!(line, "bob: hello there");
    }

    #[test]
    fn test_outbound_packet_structure() {
        let codec = codec();
        let (chat, transport) = keys();

        let frame = codec
            .encode_outbound("hi", "alice", Some(&chat), Some(&transport))
            .unwrap();
        let packet = cipher::decrypt(payload_of(&frame), &transport).unwrap();

        // "hi" pads to one block, plus the IV.
        assert!(packet.starts_with(b"PROT1\nalice\n32\n"));
        let inner = &packet[packet.len() - 32..];
        assert_eq!(cipher::decrypt(inner, &chat).unwrap(), b"hi");
    }

    #[test]
    fn test_outbound_missing_keys() {
        let codec = codec();
        let (chat, transport) = keys();

        assert_eq!(
            codec.encode_outbound("hi", "a", None, Some(&transport)),
            Err(OutboundError::ChatEncryption)
        );
        assert_eq!(
            codec.encode_outbound("hi", "a", Some(&chat), None),
            Err(OutboundError::TransportEncryption)
        );
    }

    #[test]
    fn test_outbound_cipher_failure() {
        let codec = ChatCodec::new(Arc::new(BrokenCipher));
        let key = SymmetricKey::from_bytes([1; 32]);
        assert_eq!(
            codec.encode_outbound("hi", "a", Some(&key), Some(&key)),
            Err(OutboundError::ChatEncryption)
        );
    }

    #[test]
    fn test_inbound_wrong_transport_key() {
        let codec = codec();
        let (chat, transport) = keys();
        let frame = codec
            .encode_outbound("hello", "bob", Some(&chat), Some(&transport))
            .unwrap();

        // A short payload can never decrypt.
        assert_eq!(
            codec.decode_inbound(&[0u8; 8], &transport, Some(&chat)),
            Err(InboundError::DecryptFailed)
        );

        // A wrong key either fails padding or yields a garbage packet.
        let result = codec.decode_inbound(payload_of(&frame), &chat, Some(&chat));
        assert!(result.is_err());
    }

    #[test]
    fn test_inbound_empty_decryption_is_failure() {
        let codec = ChatCodec::new(Arc::new(BrokenCipher));
        let key = SymmetricKey::from_bytes([1; 32]);
        assert_eq!(
            codec.decode_inbound(&[0u8; 32], &key, Some(&key)),
            Err(InboundError::DecryptFailed)
        );
    }

    #[test]
    fn test_inbound_protocol_errors() {
        let codec = codec();
        let (chat, transport) = keys();

        let cases: [(&[u8], InboundError); 4] = [
            (b"PROT1\nbob", InboundError::MalformedHeader),
            (b"XMPP\nbob\n3\nabc", InboundError::UnknownProtocol("XMPP".into())),
            (
                b"PROT1\nbob\nabc\nabc",
                InboundError::LengthOutOfRange { declared: None },
            ),
            (
                b"PROT1\nbob\n0\nabc",
                InboundError::LengthOutOfRange { declared: Some(0) },
            ),
        ];

        for (packet, expected) in cases {
            let payload = cipher::encrypt(packet, &transport).unwrap();
            assert_eq!(
                codec.decode_inbound(&payload, &transport, Some(&chat)),
                Err(expected)
            );
        }
    }

    #[test]
    fn test_inbound_chat_layer_failures() {
        let codec = codec();
        let (chat, transport) = keys();

        // Trailing bytes are not a valid chat ciphertext.
        let payload = cipher::encrypt(b"PROT1\nbob\n3\nabc", &transport).unwrap();
        assert_eq!(
            codec.decode_inbound(&payload, &transport, Some(&chat)),
            Err(InboundError::ChatDecryptFailed)
        );

        // Well-formed frame but no chat key configured.
        let frame = codec
            .encode_outbound("hello", "bob", Some(&chat), Some(&transport))
            .unwrap();
        assert_eq!(
            codec.decode_inbound(payload_of(&frame), &transport, None),
            Err(InboundError::ChatDecryptFailed)
        );
    }

    #[test]
    fn test_inbound_empty_chat_text_is_failure() {
        let codec = codec();
        let (chat, transport) = keys();

        let inner = cipher::encrypt(b"", &chat).unwrap();
        let packet = Packet::build("bob", &inner);
        let payload = cipher::encrypt(&packet, &transport).unwrap();

        assert_eq!(
            codec.decode_inbound(&payload, &transport, Some(&chat)),
            Err(InboundError::ChatDecryptFailed)
        );
    }

    #[test]
    fn test_outbound_frame_too_large() {
        let codec = codec();
        let (chat, transport) = keys();
        let text = "x".repeat(crate::protocol::frame::MAX_FRAME_LEN as usize);

        assert_eq!(
            codec.encode_outbound(&text, "bob", Some(&chat), Some(&transport)),
            Err(OutboundError::FrameTooLarge)
        );
    }
}
