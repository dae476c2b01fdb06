use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{Order, OrderId, OrderStatus};
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::store::OrderStore;

/// In-memory order store.
///
/// Backs the default wiring and the test suites with the same
/// conditional-update semantics a production keyed store would provide.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Removes all stored orders.
    pub async fn clear(&self) {
        self.orders.write().await.clear();
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn put(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.insert(order.order_id, order);
        Ok(())
    }

    async fn update_status(
        &self,
        order_id: OrderId,
        created_at: DateTime<Utc>,
        new_status: OrderStatus,
    ) -> Result<Order> {
        let mut orders = self.orders.write().await;
        let record = orders
            .get_mut(&order_id)
            .ok_or(StoreError::NotFound(order_id))?;

        if record.created_at != created_at {
            return Err(StoreError::KeyMismatch {
                order_id,
                stored: record.created_at,
                requested: created_at,
            });
        }

        // Same-status writes are no-ops; redelivered work items land here.
        if record.status == new_status {
            return Ok(record.clone());
        }

        if !record.status.can_transition_to(new_status) {
            return Err(StoreError::TransitionRejected {
                order_id,
                from: record.status,
                to: new_status,
            });
        }

        record.status = new_status;
        record.updated_at = Utc::now();
        tracing::debug!(%order_id, status = %new_status, "order status updated");
        Ok(record.clone())
    }

    async fn get_by_id(&self, order_id: OrderId) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&order_id).cloned())
    }

    async fn query_by_status(&self, status: OrderStatus, limit: usize) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|o| o.status == status)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit);
        Ok(matching)
    }

    async fn scan(&self, limit: usize) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.values().take(limit).cloned().collect())
    }
}
