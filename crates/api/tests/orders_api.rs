//! HTTP-level tests for the kitchen order queue.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, login, post_json, post_json_auth, put_json_auth, seed_attendees};
use serde_json::json;

async fn walk_in(app: axum::Router, token: &str, name: &str) -> serde_json::Value {
    let body = json!({ "name": name, "items": ["egg-hoppers", "ceylon-tea"] });
    let response = post_json_auth(app, "/api/v1/orders", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

async fn set_status(app: axum::Router, token: &str, id: &str, status: &str) -> axum::response::Response {
    put_json_auth(
        app,
        &format!("/api/v1/orders/{id}/status"),
        json!({ "status": status }),
        token,
    )
    .await
}

#[tokio::test]
async fn walk_in_order_has_no_claim() {
    let test = common::build_test_app();
    let token = login(test.app(), "kitchen").await;

    let order = walk_in(test.app(), &token, "  Guest at the counter ").await;
    assert_eq!(order["name"], "Guest at the counter");
    assert_eq!(order["status"], "pending");
    assert!(order.get("claim_token").is_none());
    assert!(order.get("email").is_none());
}

#[tokio::test]
async fn queue_lists_claimed_and_walk_in_orders_oldest_first() {
    let test = common::build_test_app();
    seed_attendees(&test.store, &[("nimali@example.com", "Nimali Perera", None)]).await;
    let claim = json!({ "email": "nimali@example.com", "items": ["veg-kottu"] });
    assert_eq!(
        post_json(test.app(), "/api/v1/claims", claim).await.status(),
        StatusCode::CREATED
    );

    let token = login(test.app(), "kitchen").await;
    walk_in(test.app(), &token, "Walk-in").await;

    let json = body_json(get_auth(test.app(), "/api/v1/orders", &token).await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Nimali Perera", "Walk-in"]);
}

#[tokio::test]
async fn order_moves_through_the_kitchen() {
    let test = common::build_test_app();
    let token = login(test.app(), "kitchen").await;
    let order = walk_in(test.app(), &token, "Kasun").await;
    let id = order["id"].as_str().unwrap();

    for status in ["preparing", "ready", "served"] {
        let response = set_status(test.app(), &token, id, status).await;
        assert_eq!(response.status(), StatusCode::OK, "moving to {status}");
        assert_eq!(body_json(response).await["data"]["status"], status);
    }

    // Served orders leave the default queue but can still be filtered for.
    let active = body_json(get_auth(test.app(), "/api/v1/orders", &token).await).await;
    assert!(active["data"].as_array().unwrap().is_empty());

    let served = body_json(get_auth(test.app(), "/api/v1/orders?status=served", &token).await).await;
    assert_eq!(served["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_transition_is_rejected() {
    let test = common::build_test_app();
    let token = login(test.app(), "kitchen").await;
    let order = walk_in(test.app(), &token, "Dilini").await;
    let id = order["id"].as_str().unwrap();

    let response = set_status(test.app(), &token, id, "served").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let fetched = body_json(get_auth(test.app(), &format!("/api/v1/orders/{id}"), &token).await).await;
    assert_eq!(fetched["data"]["status"], "pending");
}

#[tokio::test]
async fn unknown_order_is_not_found() {
    let test = common::build_test_app();
    let token = login(test.app(), "admin").await;
    let response = get_auth(
        test.app(),
        "/api/v1/orders/0191c2f4-5d3e-7a10-8b4c-1234567890ab",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn walk_in_needs_a_name_and_a_valid_selection() {
    let test = common::build_test_app();
    let token = login(test.app(), "kitchen").await;

    let blank = json!({ "name": " ", "items": ["egg-hoppers"] });
    let response = post_json_auth(test.app(), "/api/v1/orders", blank, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let two_drinks = json!({ "name": "Amal", "items": ["iced-coffee", "king-coconut"] });
    let response = post_json_auth(test.app(), "/api/v1/orders", two_drinks, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
