use crate::http::{
    extractor::{ActingAccount, Json, Target},
    handler::{form_page, NoncePayload},
    negotiate::Format,
    Action,
};
use axum::response::Html;
use axum_extra::either::Either;
use sesame::SessionHandle;
use tackboard_db::model::User;
use tackboard_error::Result;

#[allow(clippy::unused_async)]
pub async fn get(
    format: Format,
    ActingAccount(account): ActingAccount,
    session: SessionHandle,
    Target(user): Target<User>,
) -> Result<Either<Html<String>, Json<NoncePayload>>> {
    form_page(
        format,
        &session,
        Action::EditUser,
        "users/edit.html",
        minijinja::context! {
            account => account,
            user => user,
        },
    )
}
