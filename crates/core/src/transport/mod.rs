//! Transport port
//!
//! The protocol layers only see [`JsonTransport`]; the reqwest-backed
//! implementation lives in `palsync-infra`.

pub mod ports;

pub use ports::{HttpResult, JsonObject, JsonTransport, STATUS_OK, STATUS_UNAUTHORIZED};
