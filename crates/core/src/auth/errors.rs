//! Handshake error types
//!
//! These never reach callers of [`super::AuthProtocol::authenticate`], which
//! collapses them into `false`. They exist for logging and for callers that
//! drive the connect step directly.

use thiserror::Error;

/// Failure of one handshake step
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandshakeError {
    #[error("Connect failed: {0}")]
    Connect(String),

    #[error("Login failed: {0}")]
    Login(String),
}

impl HandshakeError {
    /// Stable label for structured logs.
    pub fn step(&self) -> &'static str {
        match self {
            Self::Connect(_) => "connect",
            Self::Login(_) => "login",
        }
    }
}
