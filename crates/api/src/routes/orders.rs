//! Route definitions for the `/orders` resource (staff only).

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// GET  /               -> list_orders (?status, limit, offset)
/// POST /               -> create_order
/// GET  /{id}           -> get_order
/// PUT  /{id}/status    -> update_order_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list_orders).post(orders::create_order))
        .route("/{id}", get(orders::get_order))
        .route("/{id}/status", put(orders::update_order_status))
}
