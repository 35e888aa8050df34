// ============================================
// File: crates/freia-common/src/lib.rs
// ============================================
//! # Freia Common - Shared Utilities Library
//!
//! ## Creation Reason
//! Provides foundational types and utilities shared across all Freia crates,
//! ensuring consistency and reducing code duplication.
//!
//! ## Main Functionality
//! - [`types`]: Server endpoint type
//! - [`validation`]: Syntax checks applied to user-supplied settings
//! - [`error`]: Common error types and result aliases
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                freia-client                         │
//! │                    │                                │
//! │         ┌──────────┴──────────┐                    │
//! │         ▼                     ▼                    │
//! │    freia-core          freia-transport             │
//! │         │                     │                    │
//! │         └──────────┬──────────┘                    │
//! │                    ▼                               │
//! │              freia-common  ◄── You are here       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - This crate is the foundation - changes affect everything
//! - Keep dependencies minimal
//! - Validation rules are a user-facing contract; loosening them changes
//!   what the PROT1 header may contain
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;
pub mod validation;

// Re-export commonly used items at crate root
pub use error::{CommonError, Result};
pub use types::Endpoint;
pub use validation::{DefaultValidator, Validator};
