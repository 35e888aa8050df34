// ============================================
// File: crates/freia-core/src/protocol/mod.rs
// ============================================
//! # Protocol Module
//!
//! ## Creation Reason
//! Defines the wire protocol spoken with the chat relay: length-prefixed
//! frames encrypted under the transport key, each carrying one PROT1
//! packet whose body is encrypted under the chat key.
//!
//! ## Main Functionality
//!
//! ### Submodules
//! - [`frame`]: Length prefix, frame bounds and frame encoding
//! - [`packet`]: PROT1 header building and parsing
//! - [`codec`]: Both directions of the two-layer encoding
//!
//! ## Protocol Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Frame   := u32_be(len) || encrypt(Packet, transportKey)    │
//! │  Packet  := "PROT1\n" user "\n" cipherLen "\n" chatCipher   │
//! │  chatCipher := encrypt(text, chatKey)                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format Principles
//! - Big-endian length prefix
//! - Text header, raw binary ciphertext
//! - The relay sees sender names but never chat plaintext
//!
//! ## ⚠️ Important Note for Next Developer
//! - Any change to the header text breaks interoperability with
//!   existing peers; there is no version negotiation beyond the tag
//!
//! ## Last Modified
//! v0.1.0 - Initial protocol definitions

pub mod codec;
pub mod frame;
pub mod packet;

// Re-export primary types
pub use codec::ChatCodec;
pub use frame::{decode_length_prefix, validate_frame_len, LENGTH_PREFIX_SIZE, MAX_FRAME_LEN};
pub use packet::{Packet, PROTOCOL_TAG};
