//! Fetch-specific error types
//!
//! Sync fetch failures are classified so callers can tell a rejected
//! session (re-authenticate) from a server problem (try again later).

use palsync_domain::PalSyncError;
use thiserror::Error;

/// Categories of fetch errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorCategory {
    /// HTTP 401 - credentials or token rejected
    Authentication,
    /// Other non-200 status or no response at all - recoverable
    Server,
    /// Body did not have the expected JSON shape - contract mismatch
    Protocol,
}

/// Sync fetch errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl FetchError {
    /// Get the error category for this error
    pub fn category(&self) -> FetchErrorCategory {
        match self {
            Self::Authentication(_) => FetchErrorCategory::Authentication,
            Self::Server(_) => FetchErrorCategory::Server,
            Self::Protocol(_) => FetchErrorCategory::Protocol,
        }
    }

    /// Whether the caller can recover by re-authenticating or trying again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.category(),
            FetchErrorCategory::Authentication | FetchErrorCategory::Server
        )
    }

    pub fn is_authentication(&self) -> bool {
        self.category() == FetchErrorCategory::Authentication
    }
}

/// Convert from PalSyncError to FetchError
impl From<PalSyncError> for FetchError {
    fn from(err: PalSyncError) -> Self {
        match err {
            PalSyncError::Auth(message) => Self::Authentication(message),
            PalSyncError::Protocol(message) | PalSyncError::InvalidInput(message) => {
                Self::Protocol(message)
            }
            PalSyncError::Network(message)
            | PalSyncError::Config(message)
            | PalSyncError::Internal(message) => Self::Server(message),
        }
    }
}
