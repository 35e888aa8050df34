// ============================================
// File: crates/freia-transport/src/error.rs
// ============================================
//! # Transport Error Types
//!
//! ## Creation Reason
//! Defines error types for opening the relay connection and for moving
//! frames over it.
//!
//! ## Main Functionality
//! - `TransportError`: Primary error enum for transport operations
//! - `step()`: Names the connect step that failed, for diagnostics
//! - `is_peer_closed()`: Tells an orderly close from other I/O failures
//!
//! ## Error Categories
//! 1. **Connect Errors**: Resolution, socket creation, options, connect
//! 2. **Stream Errors**: Peer closed, read/write failures
//!
//! ## ⚠️ Important Note for Next Developer
//! - Connect errors never leave a half-open socket behind; the socket is
//!   dropped before the error is returned
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

// ============================================
// Result Type Alias
// ============================================

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

// ============================================
// TransportError
// ============================================

/// Transport layer error types.
#[derive(Error, Debug)]
pub enum TransportError {
    // ========================================
    // Connect Errors
    // ========================================

    /// The endpoint did not resolve to any socket address.
    #[error("Failed to resolve {target}: {reason}")]
    Resolve {
        /// `address:port` that was looked up
        target: String,
        /// Why resolution failed
        reason: String,
    },

    /// Socket creation failed.
    #[error("Failed to create socket")]
    SocketCreate {
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Setting a socket option failed.
    #[error("Failed to set socket option {option}")]
    SocketOption {
        /// Option being set
        option: &'static str,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The TCP connect was refused, timed out or otherwise failed.
    #[error("Failed to connect to {addr}")]
    Connect {
        /// Address we tried to reach
        addr: SocketAddr,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    // ========================================
    // Stream Errors
    // ========================================

    /// The peer closed the connection.
    #[error("Connection closed by peer")]
    PeerClosed,

    /// I/O error from the system.
    #[error("I/O error: {context}")]
    Io {
        /// What was happening when the error occurred
        context: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl TransportError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates a `Resolve` error.
    pub fn resolve(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Resolve {
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Creates an `Io` error with context.
    ///
    /// End-of-stream errors become `PeerClosed`.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::UnexpectedEof {
            return Self::PeerClosed;
        }
        Self::Io {
            context: context.into(),
            source,
        }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Names the step that failed, as used in connect diagnostics.
    #[must_use]
    pub const fn step(&self) -> &'static str {
        match self {
            Self::Resolve { .. } => "address resolution",
            Self::SocketCreate { .. } => "socket creation",
            Self::SocketOption { .. } => "socket option",
            Self::Connect { .. } => "connect",
            Self::PeerClosed | Self::Io { .. } => "stream I/O",
        }
    }

    /// Returns `true` if the peer closed the stream.
    #[must_use]
    pub const fn is_peer_closed(&self) -> bool {
        matches!(self, Self::PeerClosed)
    }
}

// ============================================
// Tests
// ============================================
