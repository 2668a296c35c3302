use self::common::{app_test, create_post, fresh, sign_up};
use http::{header, Method, StatusCode};
use pretty_assertions::assert_eq;
use sonic_rs::JsonValueTrait;

mod common;

const JSON: &str = "application/json";

#[tokio::test]
async fn create_without_nonce() {
    app_test(|mut agent| async move {
        let response = agent
            .json(
                Method::POST,
                "/posts",
                &sonic_rs::json!({ "title": "Hello", "link": "https://example.com" }),
            )
            .await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    })
    .await;
}

#[tokio::test]
async fn create_requires_login() {
    app_test(|mut agent| async move {
        let response = agent.get("/posts/new").await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    })
    .await;
}

#[tokio::test]
async fn create_and_replay() {
    app_test(|mut agent| async move {
        sign_up(&mut agent, "alice").await;

        let nonce = agent.nonce("/posts/new").await;
        let form = [
            ("nonce", nonce.as_str()),
            ("title", "The Rust Book"),
            ("link", "https://doc.rust-lang.org/book/"),
        ];

        let response = agent.form(Method::POST, "/posts", &form).await;
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.location(), Some("/posts/1"));

        let replay = agent.form(Method::POST, "/posts", &form).await;
        assert_eq!(replay.status, StatusCode::UNAUTHORIZED);

        let page = agent.get("/posts/1").await;
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.text().contains("The Rust Book"));
    })
    .await;
}

#[tokio::test]
async fn create_as_json() {
    app_test(|mut agent| async move {
        sign_up(&mut agent, "alice").await;
        let mut api = agent.accepting(JSON);

        let nonce = api.nonce("/posts/new").await;
        let response = api
            .json(
                Method::POST,
                "/posts",
                &sonic_rs::json!({
                    "nonce": nonce,
                    "title": "Example",
                    "link": "example.com",
                }),
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED);

        let post: sonic_rs::Value = response.json();
        assert_eq!(post["title"].as_str(), Some("Example"));
        assert_eq!(post["link"].as_str(), Some("http://example.com"));
        assert_eq!(post["description"].as_str(), Some(""));
        assert_eq!(post["user_id"].as_i64(), Some(1));
    })
    .await;
}

#[tokio::test]
async fn create_validation() {
    app_test(|mut agent| async move {
        sign_up(&mut agent, "alice").await;
        let long_description = "a".repeat(256);

        for (title, link, description) in [
            ("", "https://example.com", ""),
            ("   ", "https://example.com", ""),
            ("Title", "", ""),
            ("Title", "ftp://example.com", ""),
            ("Title", "https://example.com", long_description.as_str()),
        ] {
            let nonce = agent.nonce("/posts/new").await;
            let response = agent
                .form(
                    Method::POST,
                    "/posts",
                    &[
                        ("nonce", nonce.as_str()),
                        ("title", title),
                        ("link", link),
                        ("description", description),
                    ],
                )
                .await;

            assert_eq!(response.status, StatusCode::BAD_REQUEST, "{title:?} {link:?}");
        }

        let posts = agent.accepting(JSON).get("/posts").await;
        assert_eq!(posts.text(), "[]");
    })
    .await;
}

#[tokio::test]
async fn update_by_owner() {
    app_test(|mut agent| async move {
        sign_up(&mut agent, "alice").await;
        let post = create_post(&mut agent, "Old title", "https://example.com").await;

        let nonce = agent.nonce(&format!("{post}/edit")).await;
        let response = agent
            .form(
                Method::POST,
                &format!("{post}/edit"),
                &[
                    ("nonce", nonce.as_str()),
                    ("title", "New title"),
                    ("link", "https://example.com"),
                ],
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.location(), Some(post.as_str()));

        let page = agent.get(&post).await;
        assert!(page.text().contains("New title"));
        assert!(!page.text().contains("Old title"));
    })
    .await;
}

#[tokio::test]
async fn update_by_stranger() {
    app_test(|mut agent| async move {
        sign_up(&mut agent, "alice").await;
        let post = create_post(&mut agent, "Alice's post", "https://example.com").await;

        let mut mallory = fresh(&agent, JSON);
        sign_up(&mut mallory, "mallory").await;
        let own_post = create_post(&mut mallory, "Mallory's post", "https://example.org").await;

        let response = mallory.get(&format!("{post}/edit")).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);

        let nonce = mallory.nonce(&format!("{own_post}/edit")).await;
        let response = mallory
            .json(
                Method::PUT,
                &post,
                &sonic_rs::json!({ "nonce": nonce, "title": "Pwned", "link": "https://evil.example" }),
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);

        let post: sonic_rs::Value = mallory.get(&post).await.json();
        assert_eq!(post["title"].as_str(), Some("Alice's post"));
    })
    .await;
}

#[tokio::test]
async fn delete() {
    app_test(|mut agent| async move {
        sign_up(&mut agent, "alice").await;
        let post = create_post(&mut agent, "Short-lived", "https://example.com").await;

        let nonce = agent.nonce(&format!("{post}/delete")).await;
        let response = agent
            .json(Method::DELETE, &post, &sonic_rs::json!({ "nonce": nonce }))
            .await;
        assert_eq!(response.status, StatusCode::NO_CONTENT);

        for path in [post.clone(), format!("{post}/edit"), format!("{post}/delete")] {
            assert_eq!(agent.get(&path).await.status, StatusCode::NOT_FOUND);
        }
    })
    .await;
}

#[tokio::test]
async fn delete_form() {
    app_test(|mut agent| async move {
        sign_up(&mut agent, "alice").await;
        let post = create_post(&mut agent, "Short-lived", "https://example.com").await;

        let nonce = agent.nonce(&format!("{post}/delete")).await;
        let response = agent
            .form(
                Method::POST,
                &format!("{post}/delete"),
                &[("nonce", nonce.as_str())],
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(agent.get(&post).await.status, StatusCode::NOT_FOUND);
    })
    .await;
}

#[tokio::test]
async fn delete_form_as_json() {
    app_test(|mut agent| async move {
        sign_up(&mut agent, "alice").await;
        let post = create_post(&mut agent, "Short-lived", "https://example.com").await;
        let mut api = agent.accepting(JSON);

        let nonce = api.nonce(&format!("{post}/delete")).await;
        let response = api
            .json(
                Method::POST,
                &format!("{post}/delete"),
                &sonic_rs::json!({ "nonce": nonce }),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);

        let notice: sonic_rs::Value = response.json();
        assert_eq!(
            notice,
            sonic_rs::json!({ "type": "success", "text": "Post deleted" })
        );
    })
    .await;
}

#[tokio::test]
async fn edit_fragment() {
    app_test(|mut agent| async move {
        sign_up(&mut agent, "alice").await;
        let post = create_post(&mut agent, "Prefilled title", "https://example.com").await;

        let fragment = agent.request(Method::PATCH, &format!("{post}/edit")).await;
        assert_eq!(fragment.status, StatusCode::OK);
        assert!(!fragment.text().contains("<html"));
        assert!(fragment.text().contains(r#"value="Prefilled title""#));

        let mut mallory = fresh(&agent, "text/html");
        sign_up(&mut mallory, "mallory").await;

        let response = mallory.request(Method::PATCH, &format!("{post}/edit")).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);

        let response = mallory.request(Method::PATCH, "/posts/42/edit").await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    })
    .await;
}

#[tokio::test]
async fn deleting_user_deletes_posts() {
    app_test(|mut agent| async move {
        let alice = sign_up(&mut agent, "alice").await;
        let post = create_post(&mut agent, "Orphan", "https://example.com").await;

        let nonce = agent.nonce(&format!("{alice}/delete")).await;
        let response = agent
            .form(
                Method::POST,
                &format!("{alice}/delete"),
                &[("nonce", nonce.as_str())],
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);

        assert_eq!(agent.get(&post).await.status, StatusCode::NOT_FOUND);
    })
    .await;
}

#[tokio::test]
async fn index() {
    app_test(|mut agent| async move {
        sign_up(&mut agent, "alice").await;
        create_post(&mut agent, "First", "https://example.com/1").await;
        create_post(&mut agent, "Second", "https://example.com/2").await;

        let page = agent.get("/posts/").await;
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.text().contains("First"));
        assert!(page.text().contains("Second"));

        let posts: sonic_rs::Value = agent.accepting(JSON).get("/posts").await.json();
        assert_eq!(posts[0]["title"].as_str(), Some("First"));
        assert_eq!(posts[1]["title"].as_str(), Some("Second"));
        assert_eq!(posts[1]["user"]["name"].as_str(), Some("alice"));
    })
    .await;
}

#[tokio::test]
async fn not_found() {
    app_test(|mut agent| async move {
        for path in ["/posts/1", "/posts/abc", "/posts/1/edit", "/does/not/exist"] {
            let response = agent.get(path).await;
            assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
            assert!(response
                .header(header::CONTENT_TYPE)
                .is_some_and(|value| value.starts_with("text/html")));
        }

        let response = agent.accepting(JSON).get("/posts/1").await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);

        let envelope: sonic_rs::Value = response.json();
        assert_eq!(
            envelope,
            sonic_rs::json!({ "type": "error", "text": "Not Found" })
        );
    })
    .await;
}

#[tokio::test]
async fn not_acceptable() {
    app_test(|mut agent| async move {
        let response = agent.accepting("image/png").get("/posts").await;
        assert_eq!(response.status, StatusCode::NOT_ACCEPTABLE);
    })
    .await;
}

#[tokio::test]
async fn assets() {
    app_test(|mut agent| async move {
        let response = agent.get("/public/style.css").await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.header(header::CONTENT_TYPE), Some("text/css"));

        let response = agent.get("/public/missing.css").await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    })
    .await;
}
