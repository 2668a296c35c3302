use crate::http::{extractor::ActingAccount, USER_COOKIE};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use tackboard_error::Result;
use tackboard_service::UserService;

/// Resolve the account of the logged-in user and attach it to the request
pub async fn resolve_account(
    State(user_service): State<UserService>,
    cookies: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let account = match cookies.get(USER_COOKIE) {
        Some(cookie) => {
            let account = user_service.get_by_uid(cookie.value()).await?;
            if account.is_none() {
                debug!("user cookie doesn't belong to any account");
            }

            account
        }
        None => None,
    };

    req.extensions_mut().insert(ActingAccount(account));

    Ok(next.run(req).await)
}
