use axum::routing::post;
use axum::Router;

use crate::handlers::attendees;
use crate::state::AppState;

/// Routes mounted at `/attendees`.
///
/// ```text
/// POST /verify  -> verify_attendee
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/verify", post(attendees::verify_attendee))
}
