//! Session id storage shared by the handshake and sync fetches

use palsync_domain::SessionId;
use parking_lot::RwLock;

/// Holds at most one session id.
///
/// Created empty and shared by handle (`Arc<SessionStore>`) between the
/// components of one service instance.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<SessionId>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session id, if a connect step has succeeded.
    pub fn current(&self) -> Option<SessionId> {
        self.current.read().clone()
    }

    pub fn is_established(&self) -> bool {
        self.current.read().is_some()
    }

    /// Overwrite the stored session id, returning the previous one.
    ///
    /// `None` unsets the session.
    pub fn replace(&self, session: Option<SessionId>) -> Option<SessionId> {
        std::mem::replace(&mut *self.current.write(), session)
    }

    pub fn clear(&self) {
        self.current.write().take();
    }
}
