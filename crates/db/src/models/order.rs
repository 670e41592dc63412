//! Kitchen order records and DTOs.

use cafe_core::menu::{MenuCategory, MenuItem, MAX_SELECTIONS};
use cafe_core::order::OrderStatus;
use cafe_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_not_blank;

/// `validator` length bounds are `u64`.
const SELECTIONS_LIMIT: u64 = MAX_SELECTIONS as u64;

/// A menu item as captured on an order. Copied so later menu edits do not
/// rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub category: MenuCategory,
}

impl From<&MenuItem> for OrderItem {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Meal token of the claim this order was placed from; walk-ins have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_token: Option<String>,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Everything needed to insert an order. The id is chosen by the caller so
/// a claim can reference its order before the order is written.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id: RecordId,
    pub name: String,
    pub email: Option<String>,
    pub claim_token: Option<String>,
    pub items: Vec<OrderItem>,
}

/// Body of `POST /orders` (walk-in order entered by staff).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrder {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub name: String,
    #[validate(length(min = 1, max = SELECTIONS_LIMIT, message = "select one or two menu items"))]
    pub items: Vec<String>,
}

/// Body of `PUT /orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}

/// Query parameters for the kitchen queue.
#[derive(Debug, Default, Deserialize)]
pub struct OrderListParams {
    /// Without a status filter only active orders are listed.
    pub status: Option<OrderStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
