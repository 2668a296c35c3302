use crate::{layer::Config, ResponseFuture, SessionHandle, SessionId};
use cookie::{Cookie, CookieJar};
use http::{header, Request, Response};
use std::task::{self, Poll};
use tower::Service;
use triomphe::Arc;

#[derive(Clone)]
pub struct SessionService<S> {
    inner: S,
    config: Arc<Config>,
}

impl<S> SessionService<S> {
    pub(crate) fn new(inner: S, config: Arc<Config>) -> Self {
        Self { inner, config }
    }

    fn read_session_id<B>(&self, req: &Request<B>) -> Option<SessionId> {
        let mut jar = CookieJar::new();
        for header in req.headers().get_all(header::COOKIE) {
            let Ok(value_str) = header.to_str() else {
                continue;
            };

            for cookie in Cookie::split_parse_encoded(value_str) {
                let Ok(cookie) = cookie else {
                    continue;
                };

                if cookie.name() == self.config.cookie_name {
                    jar.add_original(cookie.into_owned());
                }
            }
        }

        jar.signed(&self.config.key)
            .get(&self.config.cookie_name)
            .map(|cookie| SessionId::new(cookie.value().to_string()))
    }

    fn resolve(&self, session_id: Option<SessionId>) -> SessionHandle {
        let store = self.config.store.clone();

        if let Some(id) = session_id {
            if let Some(session) = store.load(&id) {
                return SessionHandle::resume(store, id, session);
            }

            debug!("session expired, starting a new one");
        }

        SessionHandle::create(store)
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for SessionService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Error = S::Error;
    type Future = ResponseFuture<S::Future>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let session_id = self.read_session_id(&req);
        let handle = self.resolve(session_id);

        req.extensions_mut().insert(handle.clone());

        ResponseFuture {
            inner: self.inner.call(req),
            handle,
            config: self.config.clone(),
        }
    }
}
