//! Fire-and-forget status-change notifications.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{OrderId, OrderStatus};
use serde::{Deserialize, Serialize};

use crate::error::{ChannelError, Result};

/// A status-change event published to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusNotification {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

/// Fire-and-forget publish of status-change events.
///
/// Publishing is best-effort by contract: callers log and count
/// failures but never let them fail the surrounding operation.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Publishes a status-change event under the given subject.
    async fn publish(&self, subject: &str, event: &StatusNotification) -> Result<()>;
}

/// Notifier that writes the email/SMS stand-ins to the log.
///
/// Stands in for real delivery channels: each event is logged once per
/// channel and counted in `notifications_sent_total`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl NotificationChannel for LoggingNotifier {
    async fn publish(&self, subject: &str, event: &StatusNotification) -> Result<()> {
        tracing::info!(
            order_id = %event.order_id,
            status = %event.status,
            to = event.customer_email.as_deref().unwrap_or("customer@example.com"),
            subject,
            message = %event.message,
            "email notification"
        );
        metrics::counter!("notifications_sent_total", "channel" => "email").increment(1);

        tracing::info!(
            order_id = %event.order_id,
            status = %event.status,
            subject,
            message = %event.message,
            "sms notification"
        );
        metrics::counter!("notifications_sent_total", "channel" => "sms").increment(1);

        Ok(())
    }
}

/// Recording notifier for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<RwLock<Vec<(String, StatusNotification)>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingNotifier {
    /// Creates a new recording notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the notifier to fail every publish.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Returns all published `(subject, event)` pairs.
    pub fn published(&self) -> Vec<(String, StatusNotification)> {
        self.events.read().unwrap().clone()
    }

    /// Number of successfully published events.
    pub fn count(&self) -> usize {
        self.events.read().unwrap().len()
    }
}

#[async_trait]
impl NotificationChannel for RecordingNotifier {
    async fn publish(&self, subject: &str, event: &StatusNotification) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ChannelError::Publish(
                "notification channel unavailable".to_string(),
            ));
        }
        self.events
            .write()
            .unwrap()
            .push((subject.to_string(), event.clone()));
        Ok(())
    }
}
