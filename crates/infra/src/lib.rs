//! # Palsync Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-backed [`HttpTransport`]
//! - Background task execution and result delivery
//! - Configuration loading and tracing setup
//! - The [`NetworkService`] facade tying them together
//!
//! ## Architecture
//! - Implements traits defined in `palsync-core`
//! - Depends on `palsync-domain` and `palsync-core`
//! - Contains all "impure" code (network, runtime, environment)

pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod service;
pub mod tasks;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::*;
pub use service::NetworkService;
pub use tasks::{origin_context, ContextQueue, OriginContext, ResultDispatcher, TaskRunner};
