use crate::http::{
    extractor::{ActingAccount, Json, Target},
    handler::{form_page, notice, NoncePayload},
    negotiate::Format,
    Action,
};
use axum::{
    extract::State,
    response::{Html, Response},
};
use axum_extra::either::Either;
use sesame::SessionHandle;
use tackboard_db::model::Post;
use tackboard_error::Result;
use tackboard_service::PostService;

/// Confirmation page for deleting the post
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
        "posts/delete.html",
        minijinja::context! {
            account => account,
            post => post,
        },
    )
}

/// Delete the post from the confirmation form
pub async fn post(
    format: Format,
    State(post_service): State<PostService>,
    Target(post): Target<Post>,
) -> Result<Response> {
    post_service.delete(post.id).await?;

    Ok(notice(format, "Post deleted"))
}
