#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::OnceLock;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use cafe_api::auth::jwt::JwtConfig;
use cafe_api::auth::password::hash_password;
use cafe_api::config::{EventConfig, ServerConfig, StaffCredentials, StorageBackend};
use cafe_api::router::build_app_router;
use cafe_api::state::AppState;
use cafe_core::menu::default_menu;
use cafe_db::models::attendee::Attendee;
use cafe_db::repositories::AttendeeRepo;
use cafe_db::Store;

pub const ADMIN_PASSWORD: &str = "admin-password-123";
pub const KITCHEN_PASSWORD: &str = "kitchen-password-123";

/// Argon2 is slow in debug builds; hash the fixtures once per test binary.
fn staff_hashes() -> &'static (String, String) {
    static HASHES: OnceLock<(String, String)> = OnceLock::new();
    HASHES.get_or_init(|| {
        (
            hash_password(ADMIN_PASSWORD).unwrap(),
            hash_password(KITCHEN_PASSWORD).unwrap(),
        )
    })
}

/// A `ServerConfig` with the memory backend, both staff roles enabled and
/// an event that started an hour ago.
pub fn test_config() -> ServerConfig {
    let (admin_hash, kitchen_hash) = staff_hashes().clone();
    let starts_at = Utc::now() - Duration::hours(1);
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage_backend: StorageBackend::Memory,
        data_dir: PathBuf::from("./data"),
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
        staff: StaffCredentials {
            admin_password_hash: Some(admin_hash),
            kitchen_password_hash: Some(kitchen_hash),
        },
        event: EventConfig {
            name: "Cafe Cursor Colombo".to_string(),
            venue: "Colombo, Sri Lanka".to_string(),
            starts_at,
            ends_at: starts_at + Duration::hours(8),
        },
        menu_path: None,
        image_host: None,
        max_upload_bytes: 1024 * 1024,
        cookie_secure: false,
    }
}

/// The full application plus a handle on its store for seeding.
pub struct TestApp {
    pub router: Router,
    pub store: Store,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config())
}

pub fn build_test_app_with(config: ServerConfig) -> TestApp {
    build_test_app_on(Store::memory(), config)
}

/// The full application over a caller-supplied store.
pub fn build_test_app_on(store: Store, config: ServerConfig) -> TestApp {
    let state = AppState::new(store.clone(), config.clone(), default_menu()).unwrap();
    TestApp {
        router: build_app_router(state, &config),
        store,
    }
}

/// Seed the roster directly.
pub async fn seed_attendees(store: &Store, rows: &[(&str, &str, Option<&str>)]) {
    let attendees = rows
        .iter()
        .map(|(email, name, ticket)| Attendee {
            email: email.to_string(),
            name: name.to_string(),
            ticket_code: ticket.map(str::to_string),
        })
        .collect();
    AttendeeRepo::replace_all(store, attendees).await.unwrap();
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = json_request(Method::POST, uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    let request = json_request(Method::POST, uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    let request = json_request(Method::PUT, uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST with no body, optionally replaying a cookie.
pub async fn post_with_cookie(app: Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

/// The `name=value` part of the response's `Set-Cookie`, ready to replay.
pub fn cookie_pair(response: &Response) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Log in as `role` and return the access token.
pub async fn login(app: Router, role: &str) -> String {
    let password = match role {
        "admin" => ADMIN_PASSWORD,
        "kitchen" => KITCHEN_PASSWORD,
        other => panic!("no test password for role {other}"),
    };
    let body = serde_json::json!({ "role": role, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"]["access_token"].as_str().unwrap().to_string()
}
