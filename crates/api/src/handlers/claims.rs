//! Handlers for the meal claim flow.
//!
//! ```text
//! verify  -> is this email / ticket on the roster, and unclaimed?
//! confirm -> write the claim (at most once per email), then the order
//! token   -> look a claim up by its meal token
//! ```

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cafe_core::claim::ClaimIdentifier;
use cafe_core::email::normalize_email;
use cafe_core::error::CoreError;
use cafe_core::menu::validate_selections;
use cafe_core::types::new_record_id;
use cafe_db::models::attendee::Attendee;
use cafe_db::models::claim::{Claim, ConfirmClaimRequest, NewClaim, VerifyClaimRequest};
use cafe_db::models::order::{NewOrder, Order, OrderItem};
use cafe_db::repositories::{AttendeeRepo, ClaimOutcome, ClaimRepo, OrderRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// An attendee who may claim a meal.
#[derive(Debug, Serialize)]
pub struct EligibleAttendee {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ConfirmedClaim {
    pub token: String,
    pub claim: Claim,
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub struct TokenLookup {
    pub claim: Claim,
    /// `None` only if the order was removed out of band.
    pub order: Option<Order>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_attendee(state: &AppState, identifier: &ClaimIdentifier) -> AppResult<Attendee> {
    let attendee = match identifier {
        ClaimIdentifier::Email(email) => AttendeeRepo::find_by_email(&state.store, email).await?,
        ClaimIdentifier::TicketCode(code) => {
            AttendeeRepo::find_by_ticket(&state.store, code).await?
        }
    };
    attendee.ok_or_else(|| AppError::Core(CoreError::NotRegistered(identifier.as_str().to_string())))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/claims/verify
///
/// 403 `NOT_REGISTERED` when the identifier is not on the roster, 409
/// `ALREADY_CLAIMED` when the attendee has claimed already.
pub async fn verify_claim(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<VerifyClaimRequest>,
) -> AppResult<Json<DataResponse<EligibleAttendee>>> {
    let identifier = ClaimIdentifier::parse(&input.identifier)?;
    let attendee = find_attendee(&state, &identifier).await?;

    if ClaimRepo::find_by_email(&state.store, &attendee.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::AlreadyClaimed(attendee.email)));
    }

    Ok(Json(DataResponse {
        data: EligibleAttendee {
            email: attendee.email,
            name: attendee.name,
        },
    }))
}

/// POST /api/v1/claims
///
/// Re-checks the roster, validates the selection against the menu, then
/// writes the claim with create-if-absent. A concurrent claim for the same
/// email gets 409 instead of overwriting. If the order cannot be written the
/// claim is released so the attendee can try again.
pub async fn confirm_claim(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ConfirmClaimRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ConfirmedClaim>>)> {
    let email = normalize_email(&input.email);
    let attendee = find_attendee(&state, &ClaimIdentifier::Email(email.clone())).await?;

    validate_selections(&state.menu, &input.items)?;
    let items: Vec<OrderItem> = input
        .items
        .iter()
        .filter_map(|id| state.menu.find(id))
        .map(OrderItem::from)
        .collect();

    let order_id = new_record_id();
    let outcome = ClaimRepo::try_create(
        &state.store,
        NewClaim {
            email: attendee.email.clone(),
            name: attendee.name.clone(),
            items: items.clone(),
            order_id,
        },
    )
    .await?;

    let claim = match outcome {
        ClaimOutcome::Created(claim) => claim,
        ClaimOutcome::AlreadyClaimed => {
            return Err(AppError::Core(CoreError::AlreadyClaimed(attendee.email)));
        }
    };

    let new_order = NewOrder {
        id: order_id,
        name: attendee.name,
        email: Some(attendee.email),
        claim_token: Some(claim.token.clone()),
        items,
    };

    let order = match OrderRepo::create(&state.store, new_order).await {
        Ok(order) => order,
        Err(err) => {
            tracing::error!(email = %claim.email, error = %err, "Order write failed, releasing claim");
            if let Err(release_err) = ClaimRepo::delete(&state.store, &claim.email).await {
                tracing::error!(email = %claim.email, error = %release_err, "Failed to release claim");
            }
            return Err(err.into());
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ConfirmedClaim {
                token: claim.token.clone(),
                claim,
                order,
            },
        }),
    ))
}

/// GET /api/v1/claims/token/{token}
pub async fn get_by_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<DataResponse<TokenLookup>>> {
    let claim = ClaimRepo::find_by_token(&state.store, &token)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Meal token",
                id: token.clone(),
            })
        })?;

    let order = OrderRepo::find_by_id(&state.store, claim.order_id).await?;

    Ok(Json(DataResponse {
        data: TokenLookup { claim, order },
    }))
}
