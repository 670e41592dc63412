//! Request-level error responses: malformed bodies, schema validation and
//! staff authentication.

mod common;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, get_auth, login, post_json, send};

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let test = common::build_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/questions")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"body\": "))
        .unwrap();
    let response = send(test.app(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn validation_failure_lists_fields() {
    let test = common::build_test_app();
    let body = serde_json::json!({ "body": "   ", "asker_name": "x".repeat(200) });
    let response = post_json(test.app(), "/api/v1/questions", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = json["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["asker_name", "body"]);
}

#[tokio::test]
async fn staff_routes_require_a_token() {
    let test = common::build_test_app();
    let response = get(test.app(), "/api/v1/orders").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let test = common::build_test_app();
    let response = get_auth(test.app(), "/api/v1/orders", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn kitchen_cannot_reach_admin_routes() {
    let test = common::build_test_app();
    let token = login(test.app(), "kitchen").await;

    let response = get_auth(test.app(), "/api/v1/admin/stats", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let test = common::build_test_app();
    let body = serde_json::json!({ "role": "admin", "password": "kitchen-password-123" });
    let response = post_json(test.app(), "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid role or password");
}

#[tokio::test]
async fn role_without_password_cannot_log_in() {
    let mut config = common::test_config();
    config.staff.kitchen_password_hash = None;
    let test = common::build_test_app_with(config);

    let body = serde_json::json!({ "role": "kitchen", "password": common::KITCHEN_PASSWORD });
    let response = post_json(test.app(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_returns_role_and_lifetime() {
    let test = common::build_test_app();
    let body = serde_json::json!({ "role": "admin", "password": common::ADMIN_PASSWORD });
    let json = body_json(post_json(test.app(), "/api/v1/auth/login", body).await).await;

    assert_eq!(json["data"]["role"], "admin");
    assert_eq!(json["data"]["expires_in"], 15 * 60);
    assert!(json["data"]["access_token"].is_string());
}
