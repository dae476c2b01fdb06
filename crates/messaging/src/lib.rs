//! External channel capabilities for the order processing system.
//!
//! Three collaborators live here, each behind a narrow trait so the
//! services can be wired with test doubles:
//! - `WorkQueue` — the at-least-once processing channel
//! - `NotificationChannel` — fire-and-forget status-change events
//! - `MetricsSink` — counter/value emission

pub mod error;
pub mod notification;
pub mod queue;
pub mod sink;

pub use error::{ChannelError, Result};
pub use notification::{
    LoggingNotifier, NotificationChannel, RecordingNotifier, StatusNotification,
};
pub use queue::{InMemoryWorkQueue, WorkQueue};
pub use sink::{MetricsSink, PrometheusSink, RecordingSink};
