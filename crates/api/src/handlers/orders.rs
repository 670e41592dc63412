//! Handlers for the kitchen order queue. All routes require a staff token.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cafe_core::error::CoreError;
use cafe_core::menu::validate_selections;
use cafe_core::search::{clamp_limit, clamp_offset};
use cafe_core::types::{new_record_id, RecordId};
use cafe_db::models::order::{
    CreateOrder, NewOrder, Order, OrderItem, OrderListParams, UpdateOrderStatus,
};
use cafe_db::repositories::OrderRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, ValidatedJson};
use crate::middleware::rbac::RequireStaff;
use crate::query::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/orders
///
/// Oldest first. Without `?status=` only active orders are listed.
pub async fn list_orders(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<OrderListParams>,
) -> AppResult<Json<DataResponse<Vec<Order>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let orders = OrderRepo::list(&state.store, params.status, limit, offset).await?;
    Ok(Json(DataResponse { data: orders }))
}

/// POST /api/v1/orders
///
/// A walk-in order entered at the counter. It carries no claim or token.
pub async fn create_order(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> AppResult<(StatusCode, Json<DataResponse<Order>>)> {
    validate_selections(&state.menu, &input.items)?;
    let items: Vec<OrderItem> = input
        .items
        .iter()
        .filter_map(|id| state.menu.find(id))
        .map(OrderItem::from)
        .collect();

    let order = OrderRepo::create(
        &state.store,
        NewOrder {
            id: new_record_id(),
            name: input.name.trim().to_string(),
            email: None,
            claim_token: None,
            items,
        },
    )
    .await?;

    tracing::info!(
        order_id = %order.id,
        role = user.role.as_str(),
        token_id = %user.token_id,
        "Walk-in order created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// GET /api/v1/orders/{id}
pub async fn get_order(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Json<DataResponse<Order>>> {
    let order = OrderRepo::find_by_id(&state.store, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Order",
                id: id.to_string(),
            })
        })?;
    Ok(Json(DataResponse { data: order }))
}

/// PUT /api/v1/orders/{id}/status
pub async fn update_order_status(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    AppJson(input): AppJson<UpdateOrderStatus>,
) -> AppResult<Json<DataResponse<Order>>> {
    let order = OrderRepo::update_status(&state.store, id, input.status).await?;
    tracing::debug!(order_id = %id, token_id = %user.token_id, "Order status set by staff");
    Ok(Json(DataResponse { data: order }))
}
