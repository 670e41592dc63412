//! Handlers for the public photo gallery.
//!
//! Submissions land as `pending` and only appear once an admin approves
//! them. Moderation lives in [`super::admin`].

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::Json;
use cafe_core::error::CoreError;
use cafe_core::photo::PhotoStatus;
use cafe_core::search::{clamp_limit, clamp_offset};
use cafe_core::types::RecordId;
use cafe_db::models::photo::{CreatePhoto, Photo};
use cafe_db::repositories::PhotoRepo;

use super::cookie_deduped_like;
use crate::cookies::PHOTO_LIKES_COOKIE;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::query::{PaginationParams, DEFAULT_LIMIT, MAX_LIMIT};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/photos
///
/// Approved photos only, newest first.
pub async fn list_photos(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Photo>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let photos = PhotoRepo::list(&state.store, Some(PhotoStatus::Approved), limit, offset).await?;
    Ok(Json(DataResponse { data: photos }))
}

/// POST /api/v1/photos
///
/// Registers an already-hosted image URL for review.
pub async fn create_photo(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreatePhoto>,
) -> AppResult<(StatusCode, Json<DataResponse<Photo>>)> {
    let photo = PhotoRepo::create(&state.store, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: photo })))
}

/// POST /api/v1/photos/{id}/like
pub async fn like_photo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let store = &state.store;
    cookie_deduped_like(
        &headers,
        PHOTO_LIKES_COOKIE,
        state.config.cookie_secure,
        id,
        || async { PhotoRepo::like(store, id).await.map_err(AppError::from) },
        || async {
            PhotoRepo::find_by_id(store, id)
                .await?
                .filter(|p| p.status.is_public())
                .ok_or_else(|| {
                    AppError::Core(CoreError::NotFound {
                        entity: "Photo",
                        id: id.to_string(),
                    })
                })
        },
    )
    .await
}
