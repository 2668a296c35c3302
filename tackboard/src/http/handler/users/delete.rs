use super::removal_cookie;
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
use axum_extra::{either::Either, extract::CookieJar};
use sesame::SessionHandle;
use tackboard_db::model::User;
use tackboard_error::Result;
use tackboard_service::UserService;

/// Confirmation page for deleting the account
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
        "users/delete.html",
        minijinja::context! {
            account => account,
            user => user,
        },
    )
}

/// Delete the account from the confirmation form
pub async fn post(
    format: Format,
    State(user_service): State<UserService>,
    Target(user): Target<User>,
    cookies: CookieJar,
) -> Result<(CookieJar, Response)> {
    user_service.delete(user.id).await?;

    Ok((
        cookies.remove(removal_cookie()),
        notice(format, "Account deleted"),
    ))
}
