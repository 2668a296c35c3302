use crate::http::{extractor::json_content_type, Action};
use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use sesame::{ActionName, SessionHandle, TokenRef};
use tackboard_error::{Error, ErrorType, Result, ResultExt};

/// Nonce check of a single route
#[derive(Clone)]
pub struct NonceGuard {
    action: ActionName,
    body_limit: usize,
}

impl NonceGuard {
    #[must_use]
    pub fn new(action: Action, body_limit: usize) -> Self {
        Self {
            action: action.name(),
            body_limit,
        }
    }
}

#[derive(Default, Deserialize)]
struct NonceField {
    #[serde(default)]
    nonce: Option<String>,
}

fn submitted_nonce(json: bool, body: &[u8]) -> Option<String> {
    let field: Option<NonceField> = if json {
        sonic_rs::from_slice(body).ok()
    } else {
        serde_urlencoded::from_bytes(body).ok()
    };

    field.unwrap_or_default().nonce
}

/// Consume the nonce of the route's action before the request reaches anything that mutates state
///
/// The body is buffered to read the `nonce` field and handed on unchanged.
#[instrument(skip_all, fields(action = %guard.action))]
pub async fn require_nonce(
    State(guard): State<NonceGuard>,
    session: SessionHandle,
    req: Request,
    next: Next,
) -> Result<Response> {
    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, guard.body_limit)
        .await
        .with_error_type(ErrorType::BadRequest(None))?;

    let submitted = submitted_nonce(json_content_type(&parts.headers), &bytes);
    session
        .validate_and_consume(&guard.action, submitted.as_deref().map(TokenRef::from_str))
        .map_err(|error| {
            info!(%error, "rejected request");
            Error::new(ErrorType::Unauthorized(None), error)
        })?;

    let req = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(req).await)
}
