use crate::{SessionService, SessionStore, DEFAULT_COOKIE_NAME};
use cookie::Key;
use std::{borrow::Cow, sync::Arc as StdArc};
use tower::Layer;
use triomphe::Arc;

#[derive(Clone)]
pub(crate) struct Config {
    pub(crate) cookie_name: Cow<'static, str>,
    pub(crate) key: Key,
    pub(crate) secure: bool,
    pub(crate) store: StdArc<dyn SessionStore>,
}

#[derive(Clone)]
pub struct SessionLayer {
    config: Config,
}

impl SessionLayer {
    #[must_use]
    pub fn new<St>(store: St, key: Key) -> Self
    where
        St: SessionStore,
    {
        Self {
            config: Config {
                cookie_name: Cow::Borrowed(DEFAULT_COOKIE_NAME),
                key,
                secure: false,
                store: StdArc::new(store),
            },
        }
    }

    /// Name of the cookie carrying the session identifier
    #[must_use]
    pub fn cookie_name<N>(mut self, name: N) -> Self
    where
        N: Into<Cow<'static, str>>,
    {
        self.config.cookie_name = name.into();
        self
    }

    /// Only send the session cookie over HTTPS
    #[must_use]
    pub fn secure(mut self, secure: bool) -> Self {
        self.config.secure = secure;
        self
    }
}

impl<S> Layer<S> for SessionLayer {
    type Service = SessionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionService::new(inner, Arc::new(self.config.clone()))
    }
}
