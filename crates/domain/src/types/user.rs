//! Friend and status records
//!
//! The backend uses single-letter keys to keep payloads small; see the
//! serde renames below.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record::JsonRecord;
use crate::errors::{PalSyncError, Result};

/// A friend record from the friend-updates feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "u")]
    pub user_name: String,
    #[serde(rename = "f", default)]
    pub first_name: Option<String>,
    #[serde(rename = "l", default)]
    pub last_name: Option<String>,
    #[serde(rename = "m", default)]
    pub cell_phone: Option<String>,
    #[serde(rename = "o", default)]
    pub office_phone: Option<String>,
    #[serde(rename = "h", default)]
    pub home_phone: Option<String>,
    #[serde(rename = "e", default)]
    pub email: Option<String>,
    /// Set when the friend was removed on the server side.
    #[serde(rename = "d", default)]
    pub deleted: bool,
    #[serde(rename = "i")]
    pub user_id: i64,
}

/// A friend's status message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatus {
    #[serde(rename = "i")]
    pub user_id: i64,
    #[serde(rename = "s")]
    pub status: String,
}

impl JsonRecord for User {
    fn from_json(value: &Value) -> Result<Self> {
        decode_object(value, "user")
    }
}

impl JsonRecord for UserStatus {
    fn from_json(value: &Value) -> Result<Self> {
        decode_object(value, "status")
    }
}

fn decode_object<T: serde::de::DeserializeOwned>(value: &Value, kind: &str) -> Result<T> {
    if !value.is_object() {
        return Err(PalSyncError::Protocol(format!("{kind} record is not a JSON object")));
    }

    T::deserialize(value)
        .map_err(|e| PalSyncError::Protocol(format!("invalid {kind} record: {e}")))
}
