use axum::{
    extract::{FromRequest, Request},
    Form, RequestExt,
};
use axum_extra::TypedHeader;
use headers::ContentType;
use mime::Mime;
use serde::de::DeserializeOwned;
use tackboard_error::{tackboard_error, Error, ErrorType, Result};

pub use self::{
    auth::{ActingAccount, Authenticated},
    json::{json_content_type, Json},
    target::{Owned, Target},
};

mod auth;
mod json;
mod target;

/// Deserialise the body either as a URL-encoded form or as JSON, depending on the content type
pub struct AgnosticForm<T>(pub T);

fn bad_request<E>(error: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    let body = error.to_string();
    Error::new(ErrorType::BadRequest(None).with_body(body), error)
}

impl<S, T> FromRequest<S> for AgnosticForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send + 'static,
{
    type Rejection = Error;

    async fn from_request(mut req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(content_type) = req
            .extract_parts::<TypedHeader<ContentType>>()
            .await
            .map_err(bad_request)?;
        let content_type = Mime::from(content_type);

        let content = if content_type.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED {
            Form::from_request(req, state).await.map_err(bad_request)?.0
        } else if content_type.essence_str() == mime::APPLICATION_JSON {
            Json::from_request(req, state).await?.0
        } else {
            debug!(%content_type, "unknown content type");
            return Err(tackboard_error!(
                type = ErrorType::BadRequest(None).with_body("unsupported content type"),
                "unsupported content type"
            ));
        };

        Ok(Self(content))
    }
}
