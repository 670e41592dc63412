//! Route definitions for the `/admin` console. Every handler requires the
//! admin role.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /stats                 -> get_stats
/// GET    /attendees             -> list_attendees
/// POST   /attendees/import      -> import_attendees (?mode=replace|merge)
/// DELETE /claims/{email}        -> revoke_claim
/// GET    /photos                -> list_photos (?status)
/// PUT    /photos/{id}/status    -> set_photo_status
/// DELETE /photos/{id}           -> delete_photo
/// DELETE /projects/{id}         -> delete_project
/// GET    /questions             -> list_questions
/// PUT    /questions/{id}        -> update_question
/// DELETE /questions/{id}        -> delete_question
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(admin::get_stats))
        .route("/attendees", get(admin::list_attendees))
        .route("/attendees/import", post(admin::import_attendees))
        .route("/claims/{email}", delete(admin::revoke_claim))
        .route("/photos", get(admin::list_photos))
        .route("/photos/{id}", delete(admin::delete_photo))
        .route("/photos/{id}/status", put(admin::set_photo_status))
        .route("/projects/{id}", delete(admin::delete_project))
        .route("/questions", get(admin::list_questions))
        .route(
            "/questions/{id}",
            put(admin::update_question).delete(admin::delete_question),
        )
}
