use super::removal_cookie;
use crate::http::{
    extractor::{ActingAccount, Json},
    handler::{form_page, notice, NoncePayload},
    negotiate::Format,
    Action,
};
use axum::response::{Html, Response};
use axum_extra::{either::Either, extract::CookieJar};
use http::header::REFRESH;
use sesame::SessionHandle;
use tackboard_error::Result;

#[allow(clippy::unused_async)]
pub async fn get(
    format: Format,
    ActingAccount(account): ActingAccount,
    session: SessionHandle,
) -> Result<Either<Html<String>, Json<NoncePayload>>> {
    form_page(
        format,
        &session,
        Action::Logout,
        "users/logout.html",
        minijinja::context! {
            account => account,
        },
    )
}

/// Log out and start over with a fresh session
#[allow(clippy::unused_async)]
pub async fn post(
    format: Format,
    session: SessionHandle,
    cookies: CookieJar,
) -> (CookieJar, [(http::HeaderName, &'static str); 1], Response) {
    session.regenerate();

    (
        cookies.remove(removal_cookie()),
        [(REFRESH, "0; url=/")],
        notice(format, "Successful logout"),
    )
}
