use super::{account_cookie, Credentials};
use crate::http::{
    extractor::{AgnosticForm, Json},
    handler::{form_page, NoncePayload},
    negotiate::Format,
    Action,
};
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use axum_extra::{either::Either, extract::CookieJar};
use http::header::REFRESH;
use sesame::SessionHandle;
use tackboard_error::{bail, ErrorType, Result};
use tackboard_service::{user::Login, UserService};

#[allow(clippy::unused_async)]
pub async fn get(
    format: Format,
    session: SessionHandle,
) -> Result<Either<Html<String>, Json<NoncePayload>>> {
    form_page(
        format,
        &session,
        Action::Login,
        "users/login.html",
        minijinja::context! {},
    )
}

/// Only the login form, to be inserted into an existing page
#[allow(clippy::unused_async)]
pub async fn patch(
    format: Format,
    session: SessionHandle,
) -> Result<Either<Html<String>, Json<NoncePayload>>> {
    form_page(
        format,
        &session,
        Action::Login,
        "users/_login_form.html",
        minijinja::context! {},
    )
}

pub async fn post(
    format: Format,
    State(user_service): State<UserService>,
    cookies: CookieJar,
    AgnosticForm(form): AgnosticForm<Credentials>,
) -> Result<Response> {
    let login = Login::builder()
        .name(form.name)
        .password(form.password)
        .build();

    let Some(user) = user_service.authenticate(login).await? else {
        bail!(type = ErrorType::Unauthorized(None), "wrong name or password");
    };

    let body = match format {
        Format::Html => "Successful login".into_response(),
        Format::Json => Json(&user).into_response(),
    };

    Ok((
        cookies.add(account_cookie(&user)),
        [(REFRESH, "0; url=/")],
        body,
    )
        .into_response())
}
