//! Domain types and models

pub mod account;
pub mod record;
pub mod user;

pub use account::{Account, AuthToken, Credentials, SessionId};
pub use record::JsonRecord;
pub use user::{User, UserStatus};
