use crate::http::{
    extractor::{ActingAccount, Owned, Target},
    negotiate::Format,
};
use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{header::LOCATION, StatusCode};
use tackboard_error::{bail, tackboard_error, ErrorType, Result};
use tackboard_service::{PostService, UserService};

const DASHBOARD_PATH: &str = "/users/dashboard";

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| tackboard_error!(type = ErrorType::NotFound, "identifier isn't a number"))
}

/// Reject requests that don't come from a logged-in user
pub async fn require_authenticated(
    ActingAccount(account): ActingAccount,
    req: Request,
    next: Next,
) -> Result<Response> {
    if account.is_none() {
        bail!(type = ErrorType::Unauthorized(None), "not logged in");
    }

    Ok(next.run(req).await)
}

/// Keep logged-in users away from the login and sign-up flows
///
/// Browsers are sent to their dashboard, API clients get a conflict.
pub async fn reject_if_authenticated(
    ActingAccount(account): ActingAccount,
    req: Request,
    next: Next,
) -> Result<Response> {
    if account.is_none() {
        return Ok(next.run(req).await);
    }

    let format = Format::negotiate(req.headers()).ok_or_else(|| {
        tackboard_error!(type = ErrorType::NotAcceptable, "neither HTML nor JSON is acceptable")
    })?;

    match format {
        Format::Html => Ok((StatusCode::FOUND, [(LOCATION, DASHBOARD_PATH)]).into_response()),
        Format::Json => bail!(
            type = ErrorType::Conflict(None).with_body("Error: User already logged in."),
            "user already logged in"
        ),
    }
}

/// Load the user addressed by the `user_id` path parameter
pub async fn load_user(
    State(user_service): State<UserService>,
    Path(user_id): Path<String>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let user = user_service
        .get_by_id(parse_id(&user_id)?)
        .await?
        .ok_or_else(|| tackboard_error!(type = ErrorType::NotFound, "user not found"))?;

    req.extensions_mut().insert(Target(user));

    Ok(next.run(req).await)
}

/// Load the post addressed by the `post_id` path parameter
pub async fn load_post(
    State(post_service): State<PostService>,
    Path(post_id): Path<String>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let post = post_service
        .get_by_id(parse_id(&post_id)?)
        .await?
        .ok_or_else(|| tackboard_error!(type = ErrorType::NotFound, "post not found"))?;

    req.extensions_mut().insert(Target(post));

    Ok(next.run(req).await)
}

/// Only let the owner of the loaded resource through
pub async fn require_ownership<R>(
    ActingAccount(account): ActingAccount,
    Target(resource): Target<R>,
    req: Request,
    next: Next,
) -> Result<Response>
where
    R: Owned + Clone + Send + Sync + 'static,
{
    match account {
        Some(account) if account.id == resource.owner_id() => Ok(next.run(req).await),
        Some(account) => {
            debug!(account_id = account.id, "account doesn't own the resource");
            bail!(type = ErrorType::Unauthorized(None), "not the owner of the resource");
        }
        None => bail!(type = ErrorType::Unauthorized(None), "not logged in"),
    }
}

#[cfg(test)]
mod test {
    use super::parse_id;
    use tackboard_error::ErrorType;

    #[test]
    fn identifiers() {
        assert_eq!(parse_id("42").unwrap(), 42);

        for raw in ["abc", "1.5", "", "99999999999999999999"] {
            assert_eq!(*parse_id(raw).unwrap_err().error_type(), ErrorType::NotFound);
        }
    }
}
