use crate::{SessionId, SessionIdRef, SessionState};
use moka::sync::Cache;
use std::{sync::Mutex, time::Duration};
use triomphe::Arc;

/// Shared handle to the state of a single session
///
/// The mutex serialises everything that happens to one session, so issuing and consuming nonces is atomic per session.
pub type Session = Arc<Mutex<SessionState>>;

/// Storage backend for sessions
pub trait SessionStore: Send + Sync + 'static {
    /// Look up a live session
    fn load(&self, id: &SessionIdRef) -> Option<Session>;

    /// Insert a session, replacing any session stored under the same identifier
    fn store(&self, id: SessionId, session: Session);

    /// Destroy a session
    fn remove(&self, id: &SessionIdRef);
}

/// Memory-backed session store
///
/// Sessions expire after they haven't been accessed for the configured idle timeout.
/// Once the capacity is reached, the least valuable sessions get evicted.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Cache<SessionId, Session>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new(max_sessions: u64, idle_timeout: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(idle_timeout)
            .build();

        Self { inner }
    }
}

impl SessionStore for InMemoryStore {
    fn load(&self, id: &SessionIdRef) -> Option<Session> {
        self.inner.get(id)
    }

    fn store(&self, id: SessionId, session: Session) {
        self.inner.insert(id, session);
    }

    fn remove(&self, id: &SessionIdRef) {
        self.inner.invalidate(id);
    }
}
