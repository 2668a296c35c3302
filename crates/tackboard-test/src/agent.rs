use axum::{body::Body, response::Response};
use bytes::Bytes;
use cookie::Cookie;
use http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode};
use http_body_util::BodyExt;
use scraper::{Html, Selector};
use serde::{de::DeserializeOwned, Serialize};
use sonic_rs::JsonValueTrait;
use std::{collections::BTreeMap, convert::Infallible};
use tower::{util::BoxCloneService, Service, ServiceExt};

const HTML: &str = "text/html";
const JSON: &str = "application/json";

/// Buffered response returned by the [`Agent`]
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    #[must_use]
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).expect("Response body isn't UTF-8")
    }

    #[must_use]
    pub fn json<T>(&self) -> T
    where
        T: DeserializeOwned,
    {
        sonic_rs::from_slice(&self.body).expect("Response body isn't valid JSON")
    }

    #[must_use]
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers
            .get(name)
            .map(|value| value.to_str().expect("Header value isn't ASCII"))
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.header(header::LOCATION)
    }

    /// The nonce embedded into the response
    ///
    /// Looks for the hidden `nonce` input in HTML bodies and the `nonce` field in JSON bodies.
    #[must_use]
    pub fn nonce(&self) -> Option<String> {
        let content_type = self.header(header::CONTENT_TYPE).unwrap_or_default();

        if content_type.starts_with(JSON) {
            let value: sonic_rs::Value = self.json();
            return value
                .get("nonce")
                .and_then(JsonValueTrait::as_str)
                .map(ToString::to_string);
        }

        let document = Html::parse_document(self.text());
        let selector = Selector::parse(r#"input[name="nonce"]"#).unwrap();

        document
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr("value"))
            .map(ToString::to_string)
    }
}

type BoxedService = BoxCloneService<Request<Body>, Response, Infallible>;

/// HTTP client driving a service in-process
///
/// Keeps the cookies set by the server between requests, like a browser would.
#[derive(Clone)]
pub struct Agent {
    accept: &'static str,
    cookies: BTreeMap<String, String>,
    service: BoxedService,
}

impl Agent {
    /// Agent asking for HTML documents
    #[must_use]
    pub fn browser<S>(service: S) -> Self
    where
        S: Service<Request<Body>, Response = Response, Error = Infallible> + Clone + Send + 'static,
        S::Future: Send + 'static,
    {
        Self {
            accept: HTML,
            cookies: BTreeMap::new(),
            service: BoxCloneService::new(service),
        }
    }

    /// Copy of the agent with a different `Accept` header but the same cookies
    #[must_use]
    pub fn accepting(&self, accept: &'static str) -> Self {
        Self {
            accept,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn forget_cookie(&mut self, name: &str) {
        self.cookies.remove(name);
    }

    pub async fn send(&mut self, mut req: Request<Body>) -> TestResponse {
        if !req.headers().contains_key(header::ACCEPT) {
            req.headers_mut()
                .insert(header::ACCEPT, HeaderValue::from_static(self.accept));
        }

        if !self.cookies.is_empty() {
            let cookie_header = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");

            req.headers_mut()
                .insert(header::COOKIE, HeaderValue::from_str(&cookie_header).unwrap());
        }

        let response = self.service.clone().oneshot(req).await.unwrap();
        let (parts, body) = response.into_parts();

        for set_cookie in parts.headers.get_all(header::SET_COOKIE) {
            let cookie = Cookie::parse(set_cookie.to_str().unwrap().to_string()).unwrap();
            let removed = cookie.value().is_empty()
                || cookie.max_age().is_some_and(|max_age| max_age.is_zero());

            if removed {
                self.cookies.remove(cookie.name());
            } else {
                self.cookies
                    .insert(cookie.name().to_string(), cookie.value().to_string());
            }
        }

        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body: body.collect().await.unwrap().to_bytes(),
        }
    }

    pub async fn request(&mut self, method: Method, uri: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        self.send(req).await
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri).await
    }

    /// Submit a URL-encoded form
    pub async fn form<T>(&mut self, method: Method, uri: &str, form: &T) -> TestResponse
    where
        T: Serialize + ?Sized,
    {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(serde_urlencoded::to_string(form).unwrap()))
            .unwrap();

        self.send(req).await
    }

    /// Submit a JSON body
    pub async fn json<T>(&mut self, method: Method, uri: &str, body: &T) -> TestResponse
    where
        T: Serialize + ?Sized,
    {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, JSON)
            .body(Body::from(sonic_rs::to_vec(body).unwrap()))
            .unwrap();

        self.send(req).await
    }

    /// Fetch a page and return the nonce embedded into it
    pub async fn nonce(&mut self, uri: &str) -> String {
        let response = self.get(uri).await;
        assert!(
            response.status.is_success(),
            "GET {uri} returned {}",
            response.status
        );

        response
            .nonce()
            .unwrap_or_else(|| panic!("GET {uri} didn't embed a nonce"))
    }
}
