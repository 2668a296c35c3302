use crate::{layer::Config, SessionHandle};
use cookie::{Cookie, CookieJar, Expiration, SameSite};
use http::{header, HeaderValue, Response};
use pin_project_lite::pin_project;
use std::{
    future::Future,
    pin::Pin,
    sync::PoisonError,
    task::{self, ready, Poll},
};
use triomphe::Arc;

pin_project! {
    pub struct ResponseFuture<F> {
        #[pin]
        pub(crate) inner: F,
        pub(crate) handle: SessionHandle,
        pub(crate) config: Arc<Config>,
    }
}

impl<F> ResponseFuture<F> {
    fn session_cookie(&self) -> Option<HeaderValue> {
        let id = {
            let guard = self
                .handle
                .inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            if !guard.set_cookie {
                return None;
            }

            guard.id.clone()
        };

        let cookie = Cookie::build((self.config.cookie_name.clone(), id.take()))
            .expires(Expiration::Session)
            .http_only(true)
            .path("/")
            .same_site(SameSite::Lax)
            .secure(self.config.secure);

        let mut jar = CookieJar::new();
        jar.signed_mut(&self.config.key).add(cookie);

        let cookie = jar.get(&self.config.cookie_name)?;
        HeaderValue::from_str(&cookie.encoded().to_string()).ok()
    }
}

impl<F, E, ResBody> Future for ResponseFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut task::Context<'_>) -> Poll<Self::Output> {
        let mut response = ready!(self.as_mut().project().inner.poll(cx))?;

        if let Some(value) = self.session_cookie() {
            response.headers_mut().append(header::SET_COOKIE, value);
        }

        Poll::Ready(Ok(response))
    }
}
