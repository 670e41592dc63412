//! Handlers for the community projects board.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::Json;
use cafe_core::error::CoreError;
use cafe_core::search::{clamp_limit, clamp_offset};
use cafe_core::types::RecordId;
use cafe_db::models::project::{CreateProject, Project, ProjectListParams};
use cafe_db::repositories::ProjectRepo;

use super::cookie_deduped_like;
use crate::cookies::PROJECT_LIKES_COOKIE;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::query::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::response::DataResponse;
use crate::state::AppState;

fn project_not_found(id: RecordId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id: id.to_string(),
    })
}

/// GET /api/v1/projects?sort=recent|popular
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let projects =
        ProjectRepo::list(&state.store, params.sort.unwrap_or_default(), limit, offset).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
pub async fn create_project(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let project = ProjectRepo::create(&state.store, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_by_id(&state.store, id)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    Ok(Json(DataResponse { data: project }))
}

/// POST /api/v1/projects/{id}/like
pub async fn like_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let store = &state.store;
    cookie_deduped_like(
        &headers,
        PROJECT_LIKES_COOKIE,
        state.config.cookie_secure,
        id,
        || async { ProjectRepo::like(store, id).await.map_err(AppError::from) },
        || async {
            ProjectRepo::find_by_id(store, id)
                .await?
                .ok_or_else(|| project_not_found(id))
        },
    )
    .await
}
