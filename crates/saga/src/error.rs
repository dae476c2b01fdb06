use common::OrderId;
use order_store::StoreError;
use thiserror::Error;

/// Errors that make a work item count as failed in its batch.
///
/// Business failures (declined payment, missing inventory) are not
/// errors; they end the order in FAILED and the work item succeeds.
#[derive(Debug, Error)]
pub enum SagaError {
    /// The work item references an order the store does not have.
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),

    /// The order store failed.
    #[error("Order store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, SagaError>;
