//! Incremental sync fetches (friend updates and statuses)

pub mod errors;
pub mod fetcher;
pub mod request;

pub use errors::{FetchError, FetchErrorCategory};
pub use fetcher::SyncFetcher;
pub use request::{format_timestamp, UpdateRequest};
