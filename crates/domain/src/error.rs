use messaging::ChannelError;
use order_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the intake and retrieval services.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The submitted payload failed validation. Never retried.
    #[error("{0}")]
    Validation(String),

    /// The requested order does not exist.
    #[error("Order {0} not found")]
    NotFound(String),

    /// A query parameter was invalid.
    #[error("{0}")]
    InvalidParameter(String),

    /// The order store failed.
    #[error("Order store error: {0}")]
    Store(#[from] StoreError),

    /// The work or notification channel failed.
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}
