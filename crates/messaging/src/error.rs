use thiserror::Error;

/// Errors that can occur when publishing to a channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The channel no longer accepts messages.
    #[error("Channel closed: {0}")]
    Closed(String),

    /// The publish itself failed.
    #[error("Publish failed: {0}")]
    Publish(String),
}

/// Result type for channel operations.
pub type Result<T> = std::result::Result<T, ChannelError>;
