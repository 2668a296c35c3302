#![allow(dead_code)]

use http::{Method, StatusCode};
use std::future::Future;
use tackboard::http::{SESSION_COOKIE, USER_COOKIE};
use tackboard_config::{database, server, session, Configuration};
use tackboard_test::{database_test, Agent};

pub const PASSWORD: &str = "68756e74657232";

fn configuration() -> Configuration {
    Configuration {
        database: database::Configuration {
            url: ":memory:".into(),
            max_connections: 1,
        },
        server: server::Configuration {
            port: 0,
            request_timeout_secs: 30,
            max_body_size: 64 * 1024,
        },
        session: session::Configuration {
            secret: Some("integration test secret".into()),
            idle_timeout_secs: 60,
            max_sessions: 100,
            secure_cookies: false,
        },
    }
}

/// Run the test against the complete HTTP service, backed by a fresh database
///
/// The closure receives a browser agent, further agents can be derived with [`fresh`].
pub async fn app_test<F, Fut>(func: F) -> Fut::Output
where
    F: FnOnce(Agent) -> Fut,
    Fut: Future,
{
    database_test(move |db_pool| async move {
        let config = configuration();
        let state = tackboard::initialise_state(&config, db_pool).unwrap();
        let service = tackboard::http::service(state, &config.server);

        func(Agent::browser(service)).await
    })
    .await
}

/// Agent sharing the service of `agent` but none of its cookies
pub fn fresh(agent: &Agent, accept: &'static str) -> Agent {
    let mut fresh = agent.accepting(accept);
    for name in [SESSION_COOKIE, USER_COOKIE] {
        fresh.forget_cookie(name);
    }

    fresh
}

/// Sign up through the HTML forms, leaving the agent logged in
///
/// Returns the path of the new user.
pub async fn sign_up(agent: &mut Agent, name: &str) -> String {
    let nonce = agent.nonce("/users/signup").await;
    let response = agent
        .form(
            Method::POST,
            "/users",
            &[("nonce", nonce.as_str()), ("name", name), ("password", PASSWORD)],
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
    assert!(agent.cookie(USER_COOKIE).is_some());

    response.location().unwrap().to_string()
}

/// Create a post through the HTML forms
///
/// Returns the path of the new post.
pub async fn create_post(agent: &mut Agent, title: &str, link: &str) -> String {
    let nonce = agent.nonce("/posts/new").await;
    let response = agent
        .form(
            Method::POST,
            "/posts",
            &[
                ("nonce", nonce.as_str()),
                ("title", title),
                ("link", link),
                ("description", "Worth a read"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());

    response.location().unwrap().to_string()
}
