//! Handler for the staff login.

use axum::extract::State;
use axum::Json;
use cafe_core::error::CoreError;
use cafe_core::roles::StaffRole;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub role: StaffRole,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub role: StaffRole,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Exchange the shared password for a role for an access token. A role
/// without a configured hash cannot log in.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let staff = &state.config.staff;
    let hash = match input.role {
        StaffRole::Admin => staff.admin_password_hash.as_deref(),
        StaffRole::Kitchen => staff.kitchen_password_hash.as_deref(),
    };

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid role or password".into()));

    let Some(hash) = hash else {
        tracing::warn!(role = input.role.as_str(), "Login attempt for a role with no password configured");
        return Err(invalid());
    };

    let valid = verify_password(&input.password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::info!(role = input.role.as_str(), "Failed staff login");
        return Err(invalid());
    }

    let access_token = generate_access_token(input.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(role = input.role.as_str(), "Staff logged in");
    Ok(Json(DataResponse {
        data: AuthResponse {
            access_token,
            expires_in: state.config.jwt.access_token_expiry_mins * 60,
            role: input.role,
        },
    }))
}
