//! Handler for public attendee verification.

use axum::extract::State;
use axum::Json;
use cafe_core::email::normalize_email;
use cafe_core::error::CoreError;
use cafe_db::models::attendee::VerifyAttendee;
use cafe_db::repositories::{AttendeeRepo, ClaimRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// What a registered attendee learns about themselves. Ticket codes are not
/// echoed back.
#[derive(Debug, Serialize)]
pub struct AttendeeStatus {
    pub email: String,
    pub name: String,
    pub has_claimed: bool,
}

/// POST /api/v1/attendees/verify
pub async fn verify_attendee(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<VerifyAttendee>,
) -> AppResult<Json<DataResponse<AttendeeStatus>>> {
    let email = normalize_email(&input.email);
    let attendee = AttendeeRepo::find_by_email(&state.store, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotRegistered(email.clone())))?;

    let has_claimed = ClaimRepo::find_by_email(&state.store, &email).await?.is_some();

    Ok(Json(DataResponse {
        data: AttendeeStatus {
            email: attendee.email,
            name: attendee.name,
            has_claimed,
        },
    }))
}
