// ============================================
// File: crates/freia-client/src/lib.rs
// ============================================
//! # Freia Client Library
//!
//! ## Creation Reason
//! Provides the stateful client of the Freia encrypted chat relay: one
//! connection, two derived keys, a background receive worker and a
//! thread-safe message log for a UI or CLI to poll.
//!
//! ## Main Functionality
//!
//! ### Modules
//! - [`connection`]: `ConnectionManager`, the public client surface
//! - `receiver`: Background receive worker (crate-private)
//! - [`credentials`]: Endpoint, username and derived keys
//! - [`log`]: Append-only message log and its notice lines
//! - [`config`]: TOML profile for the command-line client
//! - [`error`]: Client-specific error types
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Consumer (UI / CLI)                      │
//! │      configure · connect · send · get_messages · disconnect     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                       ConnectionManager                         │
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────────────┐    │
//! │  │  Validator  │   │  ChatCodec  │   │  Receive worker     │    │
//! │  │  (common)   │   │  (core)     │   │  (own thread)       │    │
//! │  └─────────────┘   └─────────────┘   └──────────┬──────────┘    │
//! │                                                 │               │
//! │                 MessageLog ◄────────────────────┘               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                     Transport Layer                             │
//! │            TcpConnector · FrameReader · write_frame             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//! ```text
//! send(text) → chat encrypt → PROT1 → transport encrypt → frame → TCP
//! TCP → frame → transport decrypt → PROT1 → chat decrypt → log line
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Every failure a user should see becomes a log line, never a panic
//! - Dropping the manager disconnects and joins the worker
//!
//! ## Last Modified
//! v0.1.0 - Initial client library

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod connection;
pub mod credentials;
pub mod error;
pub mod log;
mod receiver;

// Re-export primary types
pub use config::ClientConfig;
pub use connection::{ConnectOptions, ConnectionManager, ConnectionState};
pub use error::{ClientError, Result};
pub use log::MessageLog;
