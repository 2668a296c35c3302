use crate::http::{
    extractor::{ActingAccount, Json},
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
    ActingAccount(account): ActingAccount,
    session: SessionHandle,
) -> Result<Either<Html<String>, Json<NoncePayload>>> {
    form_page(
        format,
        &session,
        Action::CreatePost,
        "posts/new.html",
        minijinja::context! {
            account => account,
        },
    )
}

/// Only the creation form, to be inserted into an existing page
#[allow(clippy::unused_async)]
pub async fn patch(
    format: Format,
    session: SessionHandle,
) -> Result<Either<Html<String>, Json<NoncePayload>>> {
    form_page(
        format,
        &session,
        Action::CreatePost,
        "posts/_form.html",
        minijinja::context! {
            action => "/posts",
            submit => "Create post",
        },
    )
}
