use crate::http::{extractor::Json, negotiate::Format};
use axum::{
    extract::Request,
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use http::header::CONTENT_LENGTH;
use serde::Serialize;
use tackboard_error::ErrorMessage;

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    #[serde(rename = "type")]
    ty: &'static str,
    text: &'a str,
}

/// Render error responses in the format the client asked for
///
/// HTML clients get the error page, JSON clients the `{"type": "error", "text": ...}` envelope.
/// If neither is acceptable the plain text response is left as it is.
pub async fn render_error(req: Request, next: Next) -> Response {
    let format = Format::negotiate(req.headers());
    let mut response = next.run(req).await;

    let Some(ErrorMessage(message)) = response.extensions_mut().remove::<ErrorMessage>() else {
        return response;
    };

    let status = response.status();
    let rendered = match format {
        Some(Format::Html) => {
            let page = crate::template::render(
                "home/error.html",
                minijinja::context! {
                    status => status.as_u16(),
                    message => &message,
                },
            );

            match page {
                Ok(page) => Html(page).into_response(),
                Err(error) => {
                    error!(?error, "failed to render error page");
                    return response;
                }
            }
        }
        Some(Format::Json) => Json(ErrorEnvelope {
            ty: "error",
            text: &message,
        })
        .into_response(),
        None => return response,
    };

    let (mut parts, _body) = response.into_parts();
    let (rendered_parts, body) = rendered.into_parts();
    parts.headers.remove(CONTENT_LENGTH);
    parts.headers.extend(rendered_parts.headers);

    Response::from_parts(parts, body)
}
