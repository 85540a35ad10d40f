//! # Palsync Domain
//!
//! Domain types for the Palsync client.
//!
//! This crate contains:
//! - Account, credential, token and session types
//! - Friend and status records plus the [`JsonRecord`] decoding seam
//! - Domain error types and Result definitions
//! - Configuration structures and protocol constants
//!
//! ## Architecture
//! - No dependencies on other Palsync crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
