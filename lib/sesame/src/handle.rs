use crate::{
    ActionNameRef, NonceError, Session, SessionId, SessionState, SessionStore, Token, TokenRef,
};
use std::sync::{Arc as StdArc, Mutex, MutexGuard, PoisonError};
use triomphe::Arc;

pub(crate) struct Shared {
    pub(crate) id: SessionId,
    pub(crate) session: Session,
    pub(crate) set_cookie: bool,
}

/// Handle to the session of the current request
#[derive(Clone)]
pub struct SessionHandle {
    pub(crate) inner: Arc<Mutex<Shared>>,
    pub(crate) store: StdArc<dyn SessionStore>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionHandle {
    /// Create a brand-new session and persist it
    pub(crate) fn create(store: StdArc<dyn SessionStore>) -> Self {
        let id = SessionId::generate();
        let session = Session::new(Mutex::new(SessionState::default()));
        store.store(id.clone(), session.clone());

        Self {
            inner: Arc::new(Mutex::new(Shared {
                id,
                session,
                set_cookie: true,
            })),
            store,
        }
    }

    pub(crate) fn resume(store: StdArc<dyn SessionStore>, id: SessionId, session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Shared {
                id,
                session,
                set_cookie: false,
            })),
            store,
        }
    }

    fn session(&self) -> Session {
        lock(&self.inner).session.clone()
    }

    /// Issue a nonce for the action
    ///
    /// Embed the returned token into the form that submits to the action.
    #[must_use]
    pub fn issue_nonce(&self, action: &ActionNameRef) -> Token {
        let session = self.session();
        let token = lock(&session).issue(action);
        debug!(%action, "issued nonce");

        token
    }

    /// Validate the submitted nonce for the action and consume it
    pub fn validate_and_consume(
        &self,
        action: &ActionNameRef,
        submitted: Option<&TokenRef>,
    ) -> Result<(), NonceError> {
        let session = self.session();
        let result = lock(&session).validate_and_consume(action, submitted);

        match result {
            Ok(()) => debug!(%action, "nonce validated"),
            Err(ref error) => debug!(%action, %error, "nonce rejected"),
        }

        result
    }

    /// Destroy the current session and start a fresh one
    ///
    /// Every nonce issued in the old session becomes invalid.
    pub fn regenerate(&self) {
        let mut guard = lock(&self.inner);
        self.store.remove(&guard.id);

        let id = SessionId::generate();
        let session = Session::new(Mutex::new(SessionState::default()));
        self.store.store(id.clone(), session.clone());

        guard.id = id;
        guard.session = session;
        guard.set_cookie = true;
    }
}

#[cfg(feature = "axum")]
mod axum_impl {
    use super::SessionHandle;
    use axum_core::extract::FromRequestParts;
    use http::{request::Parts, StatusCode};

    impl<S> FromRequestParts<S> for SessionHandle
    where
        S: Sync,
    {
        type Rejection = StatusCode;

        async fn from_request_parts(
            parts: &mut Parts,
            _state: &S,
        ) -> Result<Self, Self::Rejection> {
            parts.extensions.get::<Self>().cloned().ok_or_else(|| {
                error!("service not wrapped by the session middleware");
                StatusCode::INTERNAL_SERVER_ERROR
            })
        }
    }
}
