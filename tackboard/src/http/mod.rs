use crate::{signal::Receiver, state::Zustand};
use axum::{body::Body, extract::Request, ServiceExt};
use eyre::Context;
use http::HeaderName;
use std::net::{Ipv4Addr, SocketAddr};
use tackboard_config::server;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};
use tracing::Span;

mod action;
mod extractor;
mod handler;
mod middleware;
mod negotiate;
mod router;

pub use self::action::Action;

static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Name of the cookie carrying the session identifier
pub const SESSION_COOKIE: &str = "tackboard.sid";

/// Name of the cookie carrying the public identifier of the logged-in user
pub const USER_COOKIE: &str = "user";

fn trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl Fn(&Request<Body>) -> Span + Clone,
> {
    TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .headers()
            .get(&X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            %request_id,
        )
    })
}

/// Build the complete HTTP service
///
/// Trailing slashes are trimmed before routing, so every path can be reached with and without one.
pub fn service(state: Zustand, server_config: &server::Configuration) -> NormalizePath<axum::Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router::create(state, server_config))
}

#[instrument(skip_all, fields(port = %server_config.port))]
pub async fn run(
    state: Zustand,
    server_config: server::Configuration,
    shutdown_signal: Receiver,
) -> eyre::Result<()> {
    let service = self::service(state, &server_config);
    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, server_config.port));
    let listener = TcpListener::bind(address)
        .await
        .wrap_err("Failed to bind the HTTP listener")?;

    info!(%address, "listening for HTTP requests");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(service),
    )
    .with_graceful_shutdown(shutdown_signal.wait())
    .await?;

    Ok(())
}
