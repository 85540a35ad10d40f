//! Conversions from external infrastructure errors into domain errors.

use palsync_domain::PalSyncError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PalSyncError);

impl From<InfraError> for PalSyncError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PalSyncError> for InfraError {
    fn from(value: PalSyncError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPalSyncError {
    fn into_palsync(self) -> PalSyncError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PalSyncError */
/* -------------------------------------------------------------------------- */

impl IntoPalSyncError for HttpError {
    fn into_palsync(self) -> PalSyncError {
        if self.is_timeout() {
            return PalSyncError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return PalSyncError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return PalSyncError::Config(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return PalSyncError::Protocol(format!("undecodable HTTP response: {self}"));
        }

        PalSyncError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_palsync())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
