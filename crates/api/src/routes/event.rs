//! Route definitions for the landing page resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::{event, menu};
use crate::state::AppState;

/// Routes mounted at the `/api/v1` root.
///
/// ```text
/// GET /event  -> get_event
/// GET /menu   -> get_menu
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/event", get(event::get_event))
        .route("/menu", get(menu::get_menu))
}
