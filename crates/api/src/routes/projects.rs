//! Route definitions for the `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET  /            -> list_projects (?sort=recent|popular)
/// POST /            -> create_project
/// GET  /{id}        -> get_project
/// POST /{id}/like   -> like_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list_projects).post(projects::create_project))
        .route("/{id}", get(projects::get_project))
        .route("/{id}/like", post(projects::like_project))
}
