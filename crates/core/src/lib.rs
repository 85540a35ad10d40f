//! # Palsync Core
//!
//! Protocol logic for the Palsync client - no HTTP code.
//!
//! This crate contains:
//! - Port interfaces (`JsonTransport`, `AuthResultSink`)
//! - The session store shared by handshake and fetches
//! - The connect/login handshake (`AuthProtocol`)
//! - Friend update and status fetches (`SyncFetcher`)
//!
//! ## Architecture Principles
//! - Only depends on `palsync-domain`
//! - All I/O behind traits, implemented in `palsync-infra`

pub mod auth;
pub mod session;
pub mod sync;
pub mod transport;

// Re-export specific items to avoid ambiguity
pub use auth::{AuthProtocol, AuthResultSink, HandshakeError};
pub use session::SessionStore;
pub use sync::{format_timestamp, FetchError, FetchErrorCategory, SyncFetcher, UpdateRequest};
pub use transport::{HttpResult, JsonObject, JsonTransport};
