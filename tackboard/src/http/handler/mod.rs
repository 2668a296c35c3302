use super::{extractor::Json, negotiate::Format, Action};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::either::Either;
use http::{header::LOCATION, StatusCode};
use serde::Serialize;
use sesame::SessionHandle;
use tackboard_error::{tackboard_error, Error, ErrorType, Result};

pub mod home;
pub mod posts;
pub mod public;
pub mod users;

#[derive(Serialize)]
pub struct NoncePayload {
    nonce: String,
}

/// Render a page (or fragment) containing a form
///
/// Issues a fresh nonce for the action the form submits to. JSON clients only receive the nonce.
fn form_page(
    format: Format,
    session: &SessionHandle,
    action: Action,
    template: &str,
    ctx: minijinja::Value,
) -> Result<Either<Html<String>, Json<NoncePayload>>> {
    let nonce = session.issue_nonce(&action.name());

    match format {
        Format::Html => {
            let page = crate::template::render(
                template,
                minijinja::context! {
                    nonce => nonce.as_str(),
                    ..ctx
                },
            )?;

            Ok(Either::E1(Html(page)))
        }
        Format::Json => Ok(Either::E2(Json(NoncePayload {
            nonce: nonce.take(),
        }))),
    }
}

#[derive(Serialize)]
struct Notice {
    #[serde(rename = "type")]
    ty: &'static str,
    text: &'static str,
}

/// Short confirmation of a completed form action
///
/// JSON clients get `{"type": "success", "text": ...}`, mirroring the error envelope.
fn notice(format: Format, text: &'static str) -> Response {
    match format {
        Format::Html => Html(text).into_response(),
        Format::Json => Json(Notice {
            ty: "success",
            text,
        })
        .into_response(),
    }
}

/// Response to a successful create or update
fn created<T>(format: Format, location: String, resource: T) -> Response
where
    T: Serialize,
{
    let body = match format {
        Format::Html => Html(format!(
            r#"<p>Created. Redirecting to <a href="{location}">{location}</a></p>"#
        ))
        .into_response(),
        Format::Json => Json(resource).into_response(),
    };

    (StatusCode::CREATED, [(LOCATION, location)], body).into_response()
}

#[allow(clippy::unused_async)]
pub async fn fallback() -> Error {
    tackboard_error!(type = ErrorType::NotFound, "no route matched")
}
