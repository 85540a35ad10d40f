//! Decoding seam between raw JSON objects and domain records

use serde_json::Value;

use crate::errors::Result;

/// A domain record decodable from a single JSON value.
///
/// Sync fetches decode each element of the response array through this
/// trait; implement it to plug in a different record shape.
pub trait JsonRecord: Sized {
    /// Decode one record.
    ///
    /// # Errors
    /// Returns [`crate::PalSyncError::Protocol`] when the value does not have
    /// the expected shape.
    fn from_json(value: &Value) -> Result<Self>;
}
