use std::future::Future;

use palsync_domain::{PalSyncError, Result};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Spawns units of work on a tokio runtime.
///
/// The caller never blocks. Awaiting the returned handle is optional;
/// dropping it detaches the task, which then runs to completion.
#[derive(Debug, Clone)]
pub struct TaskRunner {
    handle: Handle,
}

impl TaskRunner {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Runner bound to the runtime of the calling task.
    ///
    /// # Errors
    /// Returns `PalSyncError::Internal` when called outside a tokio runtime.
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| PalSyncError::Internal(format!("No tokio runtime available: {e}")))
    }

    pub fn run_in_background<F>(&self, work: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(work)
    }
}
