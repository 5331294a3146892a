#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use bookmarks_db::models::bookmark::Bookmark;
use bookmarks_db::repositories::{BookmarkStore, InMemoryBookmarkStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

use bookmarks_api::config::ServerConfig;
use bookmarks_api::router::build_app_router;
use bookmarks_api::state::AppState;

pub const TEST_TOKEN: &str = "test-api-token";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".parse().unwrap()],
        request_timeout_secs: 30,
        api_token: TEST_TOKEN.to_string(),
        database_url: None,
    }
}

/// Build the full application router around the given store.
///
/// Uses the same [`build_app_router`] as `main.rs` so tests exercise the
/// production middleware stack.
pub fn build_test_app(store: Arc<dyn BookmarkStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// An app backed by a fresh, empty in-memory store.
pub fn empty_app() -> (Router, Arc<InMemoryBookmarkStore>) {
    let store = Arc::new(InMemoryBookmarkStore::new());
    (build_test_app(store.clone()), store)
}

/// Fixture rows with ids 1..=4.
pub fn make_bookmarks() -> Vec<Bookmark> {
    vec![
        Bookmark {
            id: 1,
            title: "Thinkful".to_string(),
            url: "https://www.thinkful.com".to_string(),
            rating: 5,
            description: "Think outside the classroom".to_string(),
        },
        Bookmark {
            id: 2,
            title: "Google".to_string(),
            url: "https://www.google.com".to_string(),
            rating: 4,
            description: "Where we find everything else".to_string(),
        },
        Bookmark {
            id: 3,
            title: "MDN".to_string(),
            url: "https://developer.mozilla.org".to_string(),
            rating: 5,
            description: "The only place to find web documentation".to_string(),
        },
        Bookmark {
            id: 4,
            title: "Rust".to_string(),
            url: "https://www.rust-lang.org".to_string(),
            rating: 0,
            description: String::new(),
        },
    ]
}

/// An app whose store is seeded with [`make_bookmarks`].
pub fn seeded_app() -> (Router, Arc<InMemoryBookmarkStore>) {
    let store = Arc::new(InMemoryBookmarkStore::with_bookmarks(make_bookmarks()));
    (build_test_app(store.clone()), store)
}

/// Fixture row whose title and description carry markup.
pub fn make_malicious_bookmark() -> (Bookmark, serde_json::Value) {
    let stored = Bookmark {
        id: 911,
        title: r#"Naughty naughty very naughty <script>alert("xss");</script>"#.to_string(),
        url: "https://www.hackers.com".to_string(),
        rating: 1,
        description: r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#.to_string(),
    };
    let expected = serde_json::json!({
        "id": 911,
        "title": r#"Naughty naughty very naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#,
        "url": "https://www.hackers.com",
        "rating": 1,
        "description": r#"Bad image <img src="https://url.to.file.which/does-not.exist">. But not <strong>all</strong> bad."#,
    });
    (stored, expected)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: Router, req: Request<Body>) -> Response<Body> {
    app.oneshot(req).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, Some(TEST_TOKEN), None)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::DELETE, uri, Some(TEST_TOKEN), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(TEST_TOKEN), Some(body))).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, request(Method::PATCH, uri, Some(TEST_TOKEN), Some(body))).await
}

/// Send a request with no `Authorization` header.
pub async fn unauthenticated(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    send(app, request(method, uri, None, body)).await
}

/// Send a request with an arbitrary `Authorization` header value.
pub async fn with_authorization(app: Router, uri: &str, value: &str) -> Response<Body> {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, value)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
