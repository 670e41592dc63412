//! Route definitions for the `/photos` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::photos;
use crate::state::AppState;

/// Routes mounted at `/photos`.
///
/// ```text
/// GET  /            -> list_photos (approved only)
/// POST /            -> create_photo
/// POST /{id}/like   -> like_photo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(photos::list_photos).post(photos::create_photo))
        .route("/{id}/like", post(photos::like_photo))
}
