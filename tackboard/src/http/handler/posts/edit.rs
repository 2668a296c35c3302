use crate::http::{
    action::mount,
    extractor::{ActingAccount, Json, Target},
    handler::{form_page, NoncePayload},
    negotiate::Format,
    Action,
};
use axum::response::Html;
use axum_extra::either::Either;
use sesame::SessionHandle;
use tackboard_db::model::Post;
use tackboard_error::Result;

#[allow(clippy::unused_async)]
pub async fn get(
    format: Format,
    ActingAccount(account): ActingAccount,
    session: SessionHandle,
    Target(post): Target<Post>,
) -> Result<Either<Html<String>, Json<NoncePayload>>> {
    form_page(
        format,
        &session,
        Action::EditPost,
        "posts/edit.html",
        minijinja::context! {
            account => account,
            post => post,
        },
    )
}

/// Only the edit form, prefilled with the post, to be inserted into an existing page
#[allow(clippy::unused_async)]
pub async fn patch(
    format: Format,
    session: SessionHandle,
    Target(post): Target<Post>,
) -> Result<Either<Html<String>, Json<NoncePayload>>> {
    form_page(
        format,
        &session,
        Action::EditPost,
        "posts/_form.html",
        minijinja::context! {
            action => format!("{}/{}/edit", mount::POSTS, post.id),
            submit => "Save",
            post => post,
        },
    )
}
