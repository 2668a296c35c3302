use super::{
    action::{mount, route},
    handler, middleware,
    middleware::NonceGuard,
    trace_layer, Action, SESSION_COOKIE, X_REQUEST_ID,
};
use crate::state::Zustand;
use axum::{extract::DefaultBodyLimit, handler::Handler, routing, Router};
use sesame::SessionLayer;
use std::time::Duration;
use tackboard_config::server;
use tackboard_db::model::{Post, User};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

#[allow(clippy::too_many_lines)]
pub fn create(state: Zustand, server_config: &server::Configuration) -> Router {
    let body_limit = server_config.max_body_size;
    let nonce = |action: Action| {
        axum::middleware::from_fn_with_state(
            NonceGuard::new(action, body_limit),
            middleware::require_nonce,
        )
    };

    let authenticated = axum::middleware::from_fn(middleware::require_authenticated);
    let unauthenticated = axum::middleware::from_fn(middleware::reject_if_authenticated);
    let load_user = axum::middleware::from_fn_with_state(state.clone(), middleware::load_user);
    let load_post = axum::middleware::from_fn_with_state(state.clone(), middleware::load_post);
    let owns_user = axum::middleware::from_fn(middleware::require_ownership::<User>);
    let owns_post = axum::middleware::from_fn(middleware::require_ownership::<Post>);

    // Order of the guards: nonce, loader, authentication, ownership
    let user_owner = ServiceBuilder::new()
        .layer(load_user.clone())
        .layer(authenticated.clone())
        .layer(owns_user.clone());
    let user_mutation = ServiceBuilder::new()
        .layer(nonce(Action::EditUser))
        .layer(load_user.clone())
        .layer(authenticated.clone())
        .layer(owns_user);

    let post_owner = ServiceBuilder::new()
        .layer(load_post.clone())
        .layer(authenticated.clone())
        .layer(owns_post.clone());
    let post_mutation = ServiceBuilder::new()
        .layer(nonce(Action::EditPost))
        .layer(load_post.clone())
        .layer(authenticated.clone())
        .layer(owns_post);

    let users = Router::new()
        .route(
            route::ROOT,
            routing::get(handler::users::index).post(
                handler::users::create.layer(
                    ServiceBuilder::new()
                        .layer(unauthenticated.clone())
                        .layer(nonce(Action::Signup)),
                ),
            ),
        )
        .route(
            route::SIGNUP,
            routing::get(handler::users::signup::get.layer(unauthenticated.clone()))
                .patch(handler::users::signup::patch.layer(unauthenticated.clone())),
        )
        .route(
            route::LOGIN,
            routing::get(handler::users::login::get.layer(unauthenticated.clone()))
                .patch(handler::users::login::patch.layer(unauthenticated.clone()))
                .post(
                    handler::users::login::post.layer(
                        ServiceBuilder::new()
                            .layer(unauthenticated.clone())
                            .layer(nonce(Action::Login)),
                    ),
                ),
        )
        .route(
            route::LOGOUT,
            routing::get(handler::users::logout::get)
                .post(handler::users::logout::post.layer(nonce(Action::Logout))),
        )
        .route(route::DASHBOARD, routing::get(handler::users::dashboard::get))
        .route(
            route::USER,
            routing::get(handler::users::show.layer(load_user.clone()))
                .put(handler::users::update.layer(user_mutation.clone()))
                .delete(handler::users::delete.layer(user_mutation.clone())),
        )
        .route(
            route::USER_EDIT,
            routing::get(handler::users::edit::get.layer(user_owner.clone()))
                .post(handler::users::update.layer(user_mutation.clone())),
        )
        .route(
            route::USER_DELETE,
            routing::get(handler::users::delete::get.layer(user_owner))
                .post(handler::users::delete::post.layer(user_mutation)),
        );

    let posts = Router::new()
        .route(
            route::ROOT,
            routing::get(handler::posts::index).post(
                handler::posts::create.layer(
                    ServiceBuilder::new()
                        .layer(nonce(Action::CreatePost))
                        .layer(authenticated.clone()),
                ),
            ),
        )
        .route(
            route::NEW_POST,
            routing::get(handler::posts::new::get.layer(authenticated.clone()))
                .patch(handler::posts::new::patch.layer(authenticated)),
        )
        .route(
            route::POST,
            routing::get(handler::posts::show.layer(load_post))
                .put(handler::posts::update.layer(post_mutation.clone()))
                .delete(handler::posts::delete.layer(post_mutation.clone())),
        )
        .route(
            route::POST_EDIT,
            routing::get(handler::posts::edit::get.layer(post_owner.clone()))
                .patch(handler::posts::edit::patch.layer(post_owner.clone()))
                .post(handler::posts::update.layer(post_mutation.clone())),
        )
        .route(
            route::POST_DELETE,
            routing::get(handler::posts::delete::get.layer(post_owner))
                .post(handler::posts::delete::post.layer(post_mutation)),
        );

    let session_layer = SessionLayer::new(state.session.store.clone(), state.session.key.clone())
        .cookie_name(SESSION_COOKIE)
        .secure(state.session.secure);

    Router::new()
        .route("/", routing::get(handler::home::get))
        .route("/public/{*path}", routing::get(handler::public::get))
        .nest(mount::USERS, users)
        .nest(mount::POSTS, posts)
        .fallback(handler::fallback)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::resolve_account,
        ))
        .layer(axum::middleware::from_fn(middleware::render_error))
        .layer(session_layer)
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            server_config.request_timeout_secs,
        )))
        .layer(trace_layer())
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
        .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeRequestUuid))
        .with_state(state)
}
