use crate::{Error, ErrorType};
use axum_core::response::{IntoResponse, Response};
use http::StatusCode;

/// Client-visible error message
///
/// Attached to the extensions of every error response so that an outer layer can re-render the
/// body in the format the client asked for.
#[derive(Clone, Debug)]
pub struct ErrorMessage(pub String);

#[inline]
fn to_response(status_code: StatusCode, maybe_body: Option<String>) -> Response {
    let text = maybe_body.unwrap_or_else(|| {
        status_code
            .canonical_reason()
            .unwrap_or("Error")
            .to_string()
    });

    let mut response = (status_code, text.clone()).into_response();
    response.extensions_mut().insert(ErrorMessage(text));
    response
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        debug!(error = ?self.inner);

        match self.ty {
            ErrorType::BadRequest(maybe_body) => to_response(StatusCode::BAD_REQUEST, maybe_body),
            ErrorType::Conflict(maybe_body) => to_response(StatusCode::CONFLICT, maybe_body),
            ErrorType::NotAcceptable => to_response(StatusCode::NOT_ACCEPTABLE, None),
            ErrorType::NotFound => to_response(StatusCode::NOT_FOUND, None),
            ErrorType::Unauthorized(maybe_body) => {
                to_response(StatusCode::UNAUTHORIZED, maybe_body)
            }
            ErrorType::Other(maybe_body) => {
                error!(error = ?self.inner, "unhandled error in request");
                to_response(StatusCode::INTERNAL_SERVER_ERROR, maybe_body)
            }
        }
    }
}
