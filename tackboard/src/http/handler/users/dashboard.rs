use crate::http::{extractor::ActingAccount, handler::form_page, negotiate::Format, Action};
use axum::response::{IntoResponse, Response};
use http::{header::LOCATION, StatusCode};
use sesame::SessionHandle;
use tackboard_error::Result;

const LOGIN_PATH: &str = "/users/login";

/// Dashboard of the logged-in user, with the forms to edit and delete the account
#[allow(clippy::unused_async)]
pub async fn get(
    format: Format,
    ActingAccount(account): ActingAccount,
    session: SessionHandle,
) -> Result<Response> {
    let Some(account) = account else {
        return Ok((StatusCode::FOUND, [(LOCATION, LOGIN_PATH)]).into_response());
    };

    let page = form_page(
        format,
        &session,
        Action::EditUser,
        "users/dashboard.html",
        minijinja::context! {
            account => &account,
            user => &account,
        },
    )?;

    Ok(page.into_response())
}
