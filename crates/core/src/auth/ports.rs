//! Port interfaces for delivering authentication results

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Receiver of an asynchronous authentication outcome.
///
/// Invoked on the origin context that requested the authentication, never
/// on the background task that performed it.
pub trait AuthResultSink: Send + Sync {
    fn on_authentication_result(&self, success: bool);
}

impl AuthResultSink for UnboundedSender<bool> {
    fn on_authentication_result(&self, success: bool) {
        if self.send(success).is_err() {
            debug!(success, "authentication result receiver dropped");
        }
    }
}
