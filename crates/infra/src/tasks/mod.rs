//! Background execution and result delivery
//!
//! Authentication runs on a spawned tokio task; its outcome is posted back
//! to the caller's [`OriginContext`] instead of running the callback on the
//! worker.

pub mod dispatcher;
pub mod runner;

pub use dispatcher::{origin_context, ContextQueue, ContextTask, OriginContext, ResultDispatcher};
pub use runner::TaskRunner;
