//! Drives the full router against an in-memory store.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use garment_shop::{app, AppState, MemoryStore};
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = app(AppState::new(store.clone()));
        Self { router, store }
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let resp = self.router.clone().oneshot(req).await.expect("infallible");
        let status = resp.status();
        let location = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Browser-style form POST. Use `?_method=PUT` in `uri` for edits and deletes.
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                serde_urlencoded::to_string(fields).expect("encode form"),
            ))
            .unwrap();
        self.send(req).await
    }
}

pub fn product_fields<'a>(name: &'a str, category: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", name),
        ("brand", "Acme"),
        ("price", "89.50"),
        ("color", "indigo"),
        ("size", "M"),
        ("category", category),
        ("description", "Heavy cotton"),
    ]
}

pub fn garment_fields(name: &str) -> Vec<(&str, &str)> {
    vec![("name", name), ("location", "Bandung"), ("contact", "6281234")]
}

/// The id segment of a redirect like `/products/<id>?flash=...`.
pub fn id_from_location(location: &str, prefix: &str) -> String {
    location
        .strip_prefix(prefix)
        .and_then(|rest| rest.split(&['?', '/'][..]).next())
        .unwrap_or_else(|| panic!("unexpected location {location}"))
        .to_string()
}
