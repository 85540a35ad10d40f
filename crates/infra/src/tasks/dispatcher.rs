//! Delivery of authentication results to the origin context
//!
//! An [`OriginContext`] is the sending half of a caller-owned task queue;
//! the caller drains the matching [`ContextQueue`] wherever its
//! thread-affine work runs. Sink callbacks therefore execute on the
//! caller's side, never on the background task.

use std::fmt;
use std::sync::Arc;

use palsync_core::AuthResultSink;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// Work posted onto an origin context.
pub type ContextTask = Box<dyn FnOnce() + Send + 'static>;

/// Handle for posting work back to the context that requested it.
#[derive(Clone)]
pub struct OriginContext {
    queue: UnboundedSender<ContextTask>,
}

/// Caller-owned end of an origin context.
pub struct ContextQueue {
    tasks: UnboundedReceiver<ContextTask>,
}

/// Create a connected context/queue pair.
pub fn origin_context() -> (OriginContext, ContextQueue) {
    let (queue, tasks) = mpsc::unbounded_channel();
    (OriginContext { queue }, ContextQueue { tasks })
}

impl OriginContext {
    /// Post `task` to the queue. Returns `false` if the queue is gone.
    pub fn post<F>(&self, task: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.queue.send(Box::new(task)).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.queue.is_closed()
    }
}

impl fmt::Debug for OriginContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OriginContext").field("closed", &self.is_closed()).finish()
    }
}

impl ContextQueue {
    /// Wait for the next posted task and run it.
    ///
    /// Returns `false` once every [`OriginContext`] handle is dropped and
    /// the queue is empty.
    pub async fn run_next(&mut self) -> bool {
        match self.tasks.recv().await {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run every task already queued without waiting. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.tasks.try_recv() {
            task();
            ran += 1;
        }
        ran
    }
}

/// Posts authentication outcomes to their origin context.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResultDispatcher;

impl ResultDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Deliver `outcome` to `sink` on `context`.
    ///
    /// Without a sink or a context (or with a closed context) the outcome
    /// is dropped; nobody is listening. Returns whether it was posted.
    pub fn dispatch(
        &self,
        outcome: bool,
        sink: Option<&Arc<dyn AuthResultSink>>,
        context: Option<&OriginContext>,
    ) -> bool {
        let (Some(sink), Some(context)) = (sink, context) else {
            debug!(outcome, "no result listener registered, dropping authentication result");
            return false;
        };

        let sink = Arc::clone(sink);
        let posted = context.post(move || sink.on_authentication_result(outcome));
        if !posted {
            debug!(outcome, "origin context closed, dropping authentication result");
        }
        posted
    }
}
