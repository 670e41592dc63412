//! Route definitions for the `/claims` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::claims;
use crate::state::AppState;

/// Routes mounted at `/claims`.
///
/// ```text
/// POST /                -> confirm_claim
/// POST /verify          -> verify_claim
/// GET  /token/{token}   -> get_by_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(claims::confirm_claim))
        .route("/verify", post(claims::verify_claim))
        .route("/token/{token}", get(claims::get_by_token))
}
