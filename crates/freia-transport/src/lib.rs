// ============================================
// File: crates/freia-transport/src/lib.rs
// ============================================
//! # Freia Transport - Network I/O Layer
//!
//! ## Creation Reason
//! Provides the socket side of the Freia chat client: opening the TCP
//! stream to the relay and reading/writing length-prefixed frames on it.
//!
//! ## Main Functionality
//!
//! ### Modules
//! - [`tcp`]: `TcpConnector` with a bounded connect timeout
//! - [`framed`]: Blocking length-prefixed frame I/O
//! - [`error`]: Transport-specific error types
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              freia-client                           │
//! │                    │                                │
//! │                    ▼                                │
//! │             freia-transport   ◄── You are here      │
//! │                    │  (frame prefix layout)         │
//! │                    ▼                                │
//! │               freia-core                            │
//! │                    │                                │
//! │                    ▼                                │
//! │              freia-common                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │   ConnectionManager                                      │
//! │      │ send()                    ▲ receive worker        │
//! │      ▼                           │                       │
//! │   write_frame(writer)      FrameReader(try_clone)        │
//! │      │                           │                       │
//! │      └──────────► TcpStream ◄────┘                       │
//! │                      │                                   │
//! │                      ▼                                   │
//! │                    Relay                                 │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Everything here is blocking; callers own the threads
//! - No crypto here; frames arrive already encrypted
//!
//! ## Last Modified
//! v0.1.0 - Initial transport layer implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod framed;
pub mod tcp;

// Re-export primary types
pub use error::{Result, TransportError};
pub use framed::{write_frame, FrameReader};
pub use tcp::{TcpConnector, DEFAULT_CONNECT_TIMEOUT};
