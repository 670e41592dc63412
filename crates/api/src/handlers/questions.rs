//! Handlers for the public Q&A board.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::Json;
use cafe_core::error::CoreError;
use cafe_core::search::{clamp_limit, clamp_offset};
use cafe_core::types::RecordId;
use cafe_db::models::question::{CreateQuestion, Question, QuestionListParams};
use cafe_db::repositories::QuestionRepo;

use super::cookie_deduped_like;
use crate::cookies::QUESTION_UPVOTES_COOKIE;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::query::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/questions
///
/// Visible questions, most upvoted first.
pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<QuestionListParams>,
) -> AppResult<Json<DataResponse<Vec<Question>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let questions = QuestionRepo::list(&state.store, false, limit, offset).await?;
    Ok(Json(DataResponse { data: questions }))
}

/// POST /api/v1/questions
pub async fn create_question(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateQuestion>,
) -> AppResult<(StatusCode, Json<DataResponse<Question>>)> {
    let question = QuestionRepo::create(&state.store, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: question })))
}

/// POST /api/v1/questions/{id}/upvote
pub async fn upvote_question(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let store = &state.store;
    cookie_deduped_like(
        &headers,
        QUESTION_UPVOTES_COOKIE,
        state.config.cookie_secure,
        id,
        || async { QuestionRepo::upvote(store, id).await.map_err(AppError::from) },
        || async {
            QuestionRepo::find_by_id(store, id)
                .await?
                .filter(|q| q.status.is_visible())
                .ok_or_else(|| {
                    AppError::Core(CoreError::NotFound {
                        entity: "Question",
                        id: id.to_string(),
                    })
                })
        },
    )
    .await
}
