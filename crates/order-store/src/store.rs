use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{Order, OrderId, OrderStatus};

use crate::error::Result;

/// Keyed store for order records.
///
/// Records are keyed by `(order_id, created_at)`. Status writes are
/// conditional: a write that is not a valid transition from the stored
/// status must be rejected, and a same-status write must succeed as a
/// no-op. This is what makes redelivered work items safe to process.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Writes the full order record, inserting or replacing by key.
    async fn put(&self, order: Order) -> Result<()>;

    /// Update-only status write keyed by `(order_id, created_at)`.
    ///
    /// Refreshes `updated_at` and returns the stored record. Never a
    /// blind overwrite: all other fields are left untouched, and the
    /// transition is validated against the current stored status.
    async fn update_status(
        &self,
        order_id: OrderId,
        created_at: DateTime<Utc>,
        new_status: OrderStatus,
    ) -> Result<Order>;

    /// Looks up an order by its ID.
    async fn get_by_id(&self, order_id: OrderId) -> Result<Option<Order>>;

    /// Orders with the given status, most recent first.
    async fn query_by_status(&self, status: OrderStatus, limit: usize) -> Result<Vec<Order>>;

    /// Up to `limit` orders in unspecified order.
    async fn scan(&self, limit: usize) -> Result<Vec<Order>>;
}
