//! Admin-only handlers: roster import, moderation, claim revocation and the
//! dashboard counts. Every handler takes [`RequireAdmin`].

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cafe_core::error::CoreError;
use cafe_core::email::normalize_email;
use cafe_core::order::OrderStatus;
use cafe_core::photo::PhotoStatus;
use cafe_core::question::QuestionStatus;
use cafe_core::roster::parse_roster_csv;
use cafe_core::search::{clamp_limit, clamp_offset};
use cafe_core::types::RecordId;
use cafe_db::models::attendee::{Attendee, ImportMode, ImportParams, ImportSummary};
use cafe_db::models::claim::Claim;
use cafe_db::models::order::Order;
use cafe_db::models::photo::{Photo, PhotoListParams, UpdatePhotoStatus};
use cafe_db::models::question::{Question, QuestionListParams, UpdateQuestion};
use cafe_db::repositories::{
    AttendeeRepo, ClaimRepo, OrderRepo, PhotoRepo, ProjectRepo, QuestionRepo,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, ValidatedJson};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(entity: &'static str, id: impl ToString) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity,
        id: id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub attendees: usize,
    pub claims: usize,
    pub orders: BTreeMap<OrderStatus, usize>,
    pub photos: BTreeMap<PhotoStatus, usize>,
    pub projects: usize,
    pub questions: BTreeMap<QuestionStatus, usize>,
}

/// GET /api/v1/admin/stats
pub async fn get_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<AdminStats>>> {
    let store = &state.store;
    let stats = AdminStats {
        attendees: AttendeeRepo::count(store).await?,
        claims: ClaimRepo::count(store).await?,
        orders: OrderRepo::count_by_status(store).await?,
        photos: PhotoRepo::count_by_status(store).await?,
        projects: ProjectRepo::count(store).await?,
        questions: QuestionRepo::count_by_status(store).await?,
    };
    Ok(Json(DataResponse { data: stats }))
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/attendees
pub async fn list_attendees(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Attendee>>>> {
    let attendees = AttendeeRepo::list(&state.store).await?;
    Ok(Json(DataResponse { data: attendees }))
}

/// POST /api/v1/admin/attendees/import?mode=replace|merge
///
/// The body is the raw CSV text. Rows without a usable email are skipped
/// and reported; a file with no email column is rejected outright.
pub async fn import_attendees(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ImportParams>,
    body: String,
) -> AppResult<Json<DataResponse<ImportSummary>>> {
    let parsed = parse_roster_csv(&body)?;
    let mode = params.mode.unwrap_or_default();
    let imported = parsed.entries.len();
    let attendees: Vec<Attendee> = parsed.entries.into_iter().map(Attendee::from).collect();

    let (added, updated) = match mode {
        ImportMode::Replace => (AttendeeRepo::replace_all(&state.store, attendees).await?, 0),
        ImportMode::Merge => {
            let counts = AttendeeRepo::merge(&state.store, attendees).await?;
            (counts.added, counts.updated)
        }
    };
    let total = AttendeeRepo::count(&state.store).await?;

    tracing::info!(
        ?mode,
        imported,
        skipped = parsed.skipped.len(),
        total,
        "Roster imported",
    );

    Ok(Json(DataResponse {
        data: ImportSummary {
            mode,
            imported,
            added,
            updated,
            total,
            skipped: parsed.skipped,
        },
    }))
}

// ---------------------------------------------------------------------------
// Claims
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct RevokedClaim {
    pub claim: Claim,
    /// The linked order after revocation, if it still exists.
    pub order: Option<Order>,
}

/// DELETE /api/v1/admin/claims/{email}
///
/// Frees the attendee to claim again. A linked order still pending or
/// preparing is cancelled first; ready and served orders are left alone.
pub async fn revoke_claim(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<DataResponse<RevokedClaim>>> {
    let email = normalize_email(&email);
    let claim = ClaimRepo::find_by_email(&state.store, &email)
        .await?
        .ok_or_else(|| not_found("Claim", &email))?;

    let order = OrderRepo::cancel_if_cancellable(&state.store, claim.order_id).await?;
    let claim = ClaimRepo::delete(&state.store, &email)
        .await?
        .ok_or_else(|| not_found("Claim", &email))?;

    tracing::info!(email = %email, token_id = %admin.token_id, "Claim revoked");
    Ok(Json(DataResponse {
        data: RevokedClaim { claim, order },
    }))
}

// ---------------------------------------------------------------------------
// Photo moderation
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/photos?status=
///
/// All photos newest first; defaults to every status.
pub async fn list_photos(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PhotoListParams>,
) -> AppResult<Json<DataResponse<Vec<Photo>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let photos = PhotoRepo::list(&state.store, params.status, limit, offset).await?;
    Ok(Json(DataResponse { data: photos }))
}

/// PUT /api/v1/admin/photos/{id}/status
pub async fn set_photo_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    AppJson(input): AppJson<UpdatePhotoStatus>,
) -> AppResult<Json<DataResponse<Photo>>> {
    let photo = PhotoRepo::set_status(&state.store, id, input.status).await?;
    Ok(Json(DataResponse { data: photo }))
}

/// DELETE /api/v1/admin/photos/{id}
pub async fn delete_photo(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<StatusCode> {
    if PhotoRepo::delete(&state.store, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Photo", id))
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// DELETE /api/v1/admin/projects/{id}
pub async fn delete_project(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.store, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Project", id))
    }
}

// ---------------------------------------------------------------------------
// Q&A moderation
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/questions
///
/// Includes hidden questions.
pub async fn list_questions(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<QuestionListParams>,
) -> AppResult<Json<DataResponse<Vec<Question>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let questions = QuestionRepo::list(&state.store, true, limit, offset).await?;
    Ok(Json(DataResponse { data: questions }))
}

/// PUT /api/v1/admin/questions/{id}
///
/// Setting an answer marks the question answered unless a status is given.
pub async fn update_question(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    ValidatedJson(input): ValidatedJson<UpdateQuestion>,
) -> AppResult<Json<DataResponse<Question>>> {
    let question = QuestionRepo::update(&state.store, id, &input).await?;
    Ok(Json(DataResponse { data: question }))
}

/// DELETE /api/v1/admin/questions/{id}
pub async fn delete_question(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<StatusCode> {
    if QuestionRepo::delete(&state.store, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Question", id))
    }
}
