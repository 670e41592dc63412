//! Route definitions for the `/questions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::questions;
use crate::state::AppState;

/// Routes mounted at `/questions`.
///
/// ```text
/// GET  /              -> list_questions
/// POST /              -> create_question
/// POST /{id}/upvote   -> upvote_question
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(questions::list_questions).post(questions::create_question))
        .route("/{id}/upvote", post(questions::upvote_question))
}
