use crate::http::{
    extractor::Json,
    handler::{form_page, NoncePayload},
    negotiate::Format,
    Action,
};
use axum::response::Html;
use axum_extra::either::Either;
use sesame::SessionHandle;
use tackboard_error::Result;

#[allow(clippy::unused_async)]
pub async fn get(
    format: Format,
    session: SessionHandle,
) -> Result<Either<Html<String>, Json<NoncePayload>>> {
    form_page(
        format,
        &session,
        Action::Signup,
        "users/signup.html",
        minijinja::context! {},
    )
}

/// Only the sign-up form, to be inserted into an existing page
#[allow(clippy::unused_async)]
pub async fn patch(
    format: Format,
    session: SessionHandle,
) -> Result<Either<Html<String>, Json<NoncePayload>>> {
    form_page(
        format,
        &session,
        Action::Signup,
        "users/_signup_form.html",
        minijinja::context! {},
    )
}
