use chrono::{DateTime, Utc};
use common::{OrderId, OrderStatus};
use thiserror::Error;

/// Errors that can occur when interacting with the order store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for the given order ID.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// A record exists but its creation timestamp does not match the
    /// requested composite key.
    #[error("Key mismatch for order {order_id}: stored createdAt {stored}, requested {requested}")]
    KeyMismatch {
        order_id: OrderId,
        stored: DateTime<Utc>,
        requested: DateTime<Utc>,
    },

    /// The requested status write would violate the monotonic
    /// transition rules for the order state machine.
    #[error("Transition rejected for order {order_id}: {from} -> {to}")]
    TransitionRejected {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// The underlying storage backend failed.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
