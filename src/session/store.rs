//! Session storage seam.
//!
//! The web layer owns real session storage (cookies, a database). It plugs in
//! by implementing `SessionStore`; `MemorySessionStore` covers tests and
//! single-process use.

use rustc_hash::FxHashMap;

use super::SessionError;

/// Byte-blob storage keyed by session id.
pub trait SessionStore {
    /// Stored blob for a session, `None` if the session has no game yet.
    fn load(&self, session: &str) -> Result<Option<Vec<u8>>, SessionError>;

    /// Replace the session's blob.
    fn save(&mut self, session: &str, blob: Vec<u8>) -> Result<(), SessionError>;

    /// Drop everything stored for the session.
    fn clear(&mut self, session: &str) -> Result<(), SessionError>;
}

/// In-process store. Not shared: wrap in a lock to use across threads.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    blobs: FxHashMap<String, Vec<u8>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions holding a game.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, session: &str) -> Result<Option<Vec<u8>>, SessionError> {
        Ok(self.blobs.get(session).cloned())
    }

    fn save(&mut self, session: &str, blob: Vec<u8>) -> Result<(), SessionError> {
        self.blobs.insert(session.to_string(), blob);
        Ok(())
    }

    fn clear(&mut self, session: &str) -> Result<(), SessionError> {
        self.blobs.remove(session);
        Ok(())
    }
}
