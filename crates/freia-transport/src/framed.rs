// ============================================
// File: crates/freia-transport/src/framed.rs
// ============================================
//! # Length-Prefixed Frame I/O
//!
//! ## Creation Reason
//! Moves length-prefixed frames over a blocking byte stream. The prefix
//! layout comes from `freia_core::protocol`; bounds on the length are
//! checked by the caller, this layer only reads exactly what it is asked
//! for.
//!
//! ## Main Functionality
//! - `FrameReader`: Reads a 4-byte big-endian prefix, then a payload
//! - `write_frame`: Writes an already prefixed frame in one call
//!
//! ## ⚠️ Important Note for Next Developer
//! - A short read mid-prefix or mid-payload is reported as `PeerClosed`;
//!   the stream cannot be resynchronised after it
//!
//! ## Last Modified
//! v0.1.0 - Initial frame I/O

use std::io::{Read, Write};

use tracing::trace;

use freia_core::protocol::{decode_length_prefix, LENGTH_PREFIX_SIZE};

use crate::error::{Result, TransportError};

// ============================================
// FrameReader
// ============================================

/// Reads length-prefixed frames from a blocking reader.
#[derive(Debug)]
pub struct FrameReader<R> {
    inner: R,
}

impl<R: Read> FrameReader<R> {
    /// Wraps a reader.
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Reads the next length prefix.
    ///
    /// # Errors
    /// - `PeerClosed`: the stream ended before 4 bytes arrived
    /// - `Io`: any other read failure
    pub fn read_length_prefix(&mut self) -> Result<u32> {
        let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
        self.inner
            .read_exact(&mut prefix)
            .map_err(|e| TransportError::io("reading length prefix", e))?;
        let length = decode_length_prefix(prefix);
        trace!(length, "Read frame length prefix");
        Ok(length)
    }

    /// Reads exactly `length` payload bytes.
    ///
    /// # Errors
    /// - `PeerClosed`: the stream ended early
    /// - `Io`: any other read failure
    pub fn read_payload(&mut self, length: usize) -> Result<Vec<u8>> {
        let mut payload = vec![0u8; length];
        self.inner
            .read_exact(&mut payload)
            .map_err(|e| TransportError::io("reading frame payload", e))?;
        Ok(payload)
    }
}

// ============================================
// Writing
// ============================================

/// Writes a complete frame (prefix included) and flushes.
///
/// # Errors
/// - `PeerClosed` / `Io`: the write or flush failed
pub fn write_frame<W: Write + ?Sized>(writer: &mut W, frame: &[u8]) -> Result<()> {
    writer
        .write_all(frame)
        .map_err(|e| TransportError::io("writing frame", e))?;
    writer
        .flush()
        .map_err(|e| TransportError::io("flushing frame", e))?;
    trace!(len = frame.len(), "Wrote frame");
    Ok(())
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_prefix_and_payload() {
        let mut bytes = vec![0, 0, 0, 5];
        bytes.extend_from_slice(b"hello");
        let mut reader = FrameReader::new(Cursor::new(bytes));

        let len = reader.read_length_prefix().unwrap();
        assert_eq!(len, 5);
        assert_eq!(reader.read_payload(len as usize).unwrap(), b"hello");
    }

    #[test]
    fn test_eof_is_peer_closed() {
        let mut reader = FrameReader::new(Cursor::new(Vec::<u8>::new()));
        assert!(reader.read_length_prefix().unwrap_err().is_peer_closed());

        let mut reader = FrameReader::new(Cursor::new(vec![0, 0]));
        assert!(reader.read_length_prefix().unwrap_err().is_peer_closed());
    }

    #[test]
    fn test_short_payload_is_peer_closed() {
        let mut reader = FrameReader::new(Cursor::new(vec![0, 0, 0, 9, 1, 2, 3]));
        let len = reader.read_length_prefix().unwrap();
        assert!(reader.read_payload(len as usize).unwrap_err().is_peer_closed());
    }

    #[test]
    fn test_write_frame() {
        let mut out = Vec::new();
        write_frame(&mut out, &[0, 0, 0, 2, 0xAA, 0xBB]).unwrap();
        assert_eq!(out, vec![0, 0, 0, 2, 0xAA, 0xBB]);
    }
}
