//! Repository for kitchen orders.

use std::collections::BTreeMap;

use cafe_core::error::CoreError;
use cafe_core::order::{validate_transition, OrderStatus};
use cafe_core::search::paginate;
use cafe_core::types::RecordId;
use chrono::Utc;

use super::not_found;
use crate::error::{RepoError, StoreError};
use crate::models::order::{NewOrder, Order};
use crate::store::{collections, Store};

/// Provides CRUD operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new pending order.
    pub async fn create(store: &Store, input: NewOrder) -> Result<Order, RepoError> {
        let now = Utc::now();
        let order = Order {
            id: input.id,
            name: input.name,
            email: input.email,
            claim_token: input.claim_token,
            items: input.items,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let created = order.clone();
        store
            .mutate(collections::ORDERS, move |orders: &mut Vec<Order>| {
                if orders.iter().any(|o| o.id == order.id) {
                    return Err(RepoError::Core(CoreError::Conflict(format!(
                        "Order {} already exists",
                        order.id
                    ))));
                }
                orders.push(order);
                Ok(())
            })
            .await?;

        tracing::info!(order_id = %created.id, items = created.items.len(), "Order created");
        Ok(created)
    }

    pub async fn find_by_id(store: &Store, id: RecordId) -> Result<Option<Order>, StoreError> {
        let orders: Vec<Order> = store.read_all(collections::ORDERS).await?;
        Ok(orders.into_iter().find(|o| o.id == id))
    }

    /// The kitchen queue, oldest first.
    ///
    /// With no status filter only active (pending, preparing, ready) orders
    /// are returned.
    pub async fn list(
        store: &Store,
        status: Option<OrderStatus>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = store.read_all(collections::ORDERS).await?;
        orders.retain(|o| match status {
            Some(s) => o.status == s,
            None => o.status.is_active(),
        });
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(paginate(orders, limit, offset))
    }

    /// Move an order to `next`, rejecting transitions the workflow forbids.
    pub async fn update_status(
        store: &Store,
        id: RecordId,
        next: OrderStatus,
    ) -> Result<Order, RepoError> {
        let order = store
            .mutate(collections::ORDERS, |orders: &mut Vec<Order>| {
                let order = orders
                    .iter_mut()
                    .find(|o| o.id == id)
                    .ok_or_else(|| not_found("Order", id))?;
                validate_transition(order.status, next)?;
                order.status = next;
                order.updated_at = Utc::now();
                Ok::<_, RepoError>(order.clone())
            })
            .await?;

        tracing::info!(order_id = %id, status = %next, "Order status updated");
        Ok(order)
    }

    /// Cancel an order when its status still allows it, in one locked cycle.
    ///
    /// Orders that are ready, served or already cancelled are left alone.
    /// Returns the order as it stands afterwards, or `None` if it is gone.
    pub async fn cancel_if_cancellable(
        store: &Store,
        id: RecordId,
    ) -> Result<Option<Order>, StoreError> {
        let outcome = store
            .mutate(collections::ORDERS, |orders: &mut Vec<Order>| {
                let Some(order) = orders.iter_mut().find(|o| o.id == id) else {
                    return Ok::<_, StoreError>(None);
                };
                let cancelled = order
                    .status
                    .valid_transitions()
                    .contains(&OrderStatus::Cancelled);
                if cancelled {
                    order.status = OrderStatus::Cancelled;
                    order.updated_at = Utc::now();
                }
                Ok(Some((order.clone(), cancelled)))
            })
            .await?;

        Ok(outcome.map(|(order, cancelled)| {
            if cancelled {
                tracing::info!(order_id = %id, "Order cancelled");
            }
            order
        }))
    }

    /// Order count for every status, including zeroes.
    pub async fn count_by_status(store: &Store) -> Result<BTreeMap<OrderStatus, usize>, StoreError> {
        let orders: Vec<Order> = store.read_all(collections::ORDERS).await?;
        let mut counts: BTreeMap<OrderStatus, usize> =
            OrderStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for order in &orders {
            *counts.entry(order.status).or_default() += 1;
        }
        Ok(counts)
    }
}
