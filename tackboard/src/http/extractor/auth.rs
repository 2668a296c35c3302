use axum::extract::FromRequestParts;
use http::request::Parts;
use std::convert::Infallible;
use tackboard_db::model::User;
use tackboard_error::{tackboard_error, Error, ErrorType};

/// Account of the user sending the request
///
/// Resolved once per request from the `user` cookie by the account middleware. `None` if nobody is logged in.
#[derive(Clone, Debug, Default)]
pub struct ActingAccount(pub Option<User>);

impl<S> FromRequestParts<S> for ActingAccount
where
    S: Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned().unwrap_or_default())
    }
}

/// Account of the logged-in user sending the request
///
/// Rejects the request with an unauthorised error if nobody is logged in.
#[derive(Clone, Debug)]
pub struct Authenticated(pub User);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ActingAccount>()
            .and_then(|ActingAccount(account)| account.clone())
            .map(Self)
            .ok_or_else(|| tackboard_error!(type = ErrorType::Unauthorized(None), "not logged in"))
    }
}
