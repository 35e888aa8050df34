// ============================================
// File: crates/freia-core/src/protocol/frame.rs
// ============================================
//! # Transport Frame
//!
//! ## Creation Reason
//! Defines the outermost wire unit exchanged with the relay: a
//! big-endian length prefix followed by the transport-encrypted payload.
//!
//! ## Frame Format
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Length (4 bytes, u32 big-endian) │ 1 ..= 10 MiB          │
//! ├──────────────────────────────────────────────────────────┤
//! │ Payload (Length bytes)           │ iv || AES-CBC(Packet) │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - A length outside `1..=MAX_FRAME_LEN` means the stream is out of
//!   sync; the reader must drop the connection rather than skip ahead
//!
//! ## Last Modified
//! v0.1.0 - Initial frame definitions

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{CoreError, Result};

// ============================================
// Constants
// ============================================

/// Size of the length prefix in bytes.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Largest payload a frame may declare (10 MiB).
pub const MAX_FRAME_LEN: u32 = 10 * 1024 * 1024;

// ============================================
// Length Prefix
// ============================================

/// Interprets a received length prefix.
#[must_use]
pub const fn decode_length_prefix(prefix: [u8; LENGTH_PREFIX_SIZE]) -> u32 {
    u32::from_be_bytes(prefix)
}

/// Checks a declared frame length and returns it as a buffer size.
///
/// # Errors
/// - `InvalidFrameLength` if `length` is zero or above `MAX_FRAME_LEN`
pub fn validate_frame_len(length: u32) -> Result<usize> {
    if length == 0 || length > MAX_FRAME_LEN {
        return Err(CoreError::InvalidFrameLength {
            length,
            max: MAX_FRAME_LEN,
        });
    }
    usize::try_from(length).map_err(|_| CoreError::InvalidFrameLength {
        length,
        max: MAX_FRAME_LEN,
    })
}

// ============================================
// Frame Encoding
// ============================================

/// Prepends the length prefix to an encrypted payload.
///
/// Prefix and payload are returned as one contiguous buffer so a single
/// write puts the whole frame on the wire.
///
/// # Errors
/// - `InvalidFrameLength` if the payload is empty or larger than
///   `MAX_FRAME_LEN`
pub fn encode_frame(payload: &[u8]) -> Result<Bytes> {
    let length = u32::try_from(payload.len()).map_err(|_| CoreError::InvalidFrameLength {
        length: u32::MAX,
        max: MAX_FRAME_LEN,
    })?;
    validate_frame_len(length)?;

    let mut buf = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + payload.len());
    buf.put_u32(length);
    buf.put_slice(payload);
    Ok(buf.freeze())
}

// ============================================
// Tests
// ============================================
