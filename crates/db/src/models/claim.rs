//! Meal claim records and DTOs.

use cafe_core::menu::MAX_SELECTIONS;
use cafe_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::order::OrderItem;
use super::{validate_email_input, validate_not_blank};

/// `validator` length bounds are `u64`.
const SELECTIONS_LIMIT: u64 = MAX_SELECTIONS as u64;

/// A claimed meal, stored as one document per email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub email: String,
    pub name: String,
    pub token: String,
    pub items: Vec<OrderItem>,
    pub order_id: RecordId,
    pub claimed_at: Timestamp,
}

/// Reverse lookup from meal token to the claiming email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenIndex {
    pub token: String,
    pub email: String,
}

/// Input to [`crate::repositories::ClaimRepo::try_create`].
#[derive(Debug, Clone)]
pub struct NewClaim {
    pub email: String,
    pub name: String,
    pub items: Vec<OrderItem>,
    pub order_id: RecordId,
}

/// Body of `POST /claims/verify`.
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyClaimRequest {
    /// Email or ticket code.
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 254, message = "must be at most 254 characters")
    )]
    pub identifier: String,
}

/// Body of `POST /claims`.
#[derive(Debug, Deserialize, Validate)]
pub struct ConfirmClaimRequest {
    #[validate(custom(function = "validate_email_input"))]
    pub email: String,
    #[validate(length(min = 1, max = SELECTIONS_LIMIT, message = "select one or two menu items"))]
    pub items: Vec<String>,
}
