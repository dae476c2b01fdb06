//! Saga execution: payment, then inventory, with refund compensation.

use common::{Order, OrderId, OrderStatus, WorkItem};
use messaging::{MetricsSink, NotificationChannel, StatusNotification};
use order_store::OrderStore;
use serde::Serialize;

use crate::error::{Result, SagaError};
use crate::gateways::{InventoryGateway, PaymentGateway, PaymentRequest};
use crate::outcome::StepOutcome;

/// Per-item verdict for a processed batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    pub order_id: OrderId,
    pub status: BatchItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Whether a work item was handled.
///
/// An order ending in FAILED still counts as handled; only processing
/// errors (store failures, unknown orders) mark the item failed so it
/// can be redelivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchItemStatus {
    Success,
    Failed,
}

/// Drives one order from PENDING to a terminal status.
///
/// Payment is captured first, then inventory reserved. An inventory
/// failure after a captured payment triggers a refund before the order
/// is marked FAILED. Work items are redelivered at least once, so
/// settled orders are detected and skipped up front.
pub struct OrderSaga<S, P, I, N, M> {
    store: S,
    payment: P,
    inventory: I,
    notifier: N,
    metrics: M,
}

impl<S, P, I, N, M> OrderSaga<S, P, I, N, M>
where
    S: OrderStore,
    P: PaymentGateway,
    I: InventoryGateway,
    N: NotificationChannel,
    M: MetricsSink,
{
    pub fn new(store: S, payment: P, inventory: I, notifier: N, metrics: M) -> Self {
        Self {
            store,
            payment,
            inventory,
            notifier,
            metrics,
        }
    }

    /// Processes a batch of work items, isolating failures.
    ///
    /// One item failing never stops the rest of the batch; each item
    /// gets its own verdict.
    pub async fn process_batch(&self, items: Vec<WorkItem>) -> Vec<BatchItemResult> {
        let mut results = Vec::with_capacity(items.len());
        for item in items {
            let order_id = item.order_id;
            match self.process_one(item).await {
                Ok(()) => {
                    self.metrics.incr("orders_processed_total", &[]);
                    results.push(BatchItemResult {
                        order_id,
                        status: BatchItemStatus::Success,
                        error: None,
                    });
                }
                Err(e) => {
                    tracing::error!(%order_id, error = %e, "order processing failed");
                    self.metrics.incr("order_processing_errors_total", &[]);
                    results.push(BatchItemResult {
                        order_id,
                        status: BatchItemStatus::Failed,
                        error: Some(e.to_string()),
                    });
                }
            }
        }
        results
    }

    /// Runs the saga for a single work item.
    #[tracing::instrument(skip(self, item), fields(order_id = %item.order_id))]
    pub async fn process_one(&self, item: WorkItem) -> Result<()> {
        let order = self
            .store
            .get_by_id(item.order_id)
            .await?
            .ok_or(SagaError::OrderNotFound(item.order_id))?;

        // Redelivered item for an already-settled order: nothing to do.
        if order.status.is_terminal() {
            tracing::info!(status = %order.status, "skipping redelivered work item");
            self.metrics.incr("orders_redelivered_total", &[]);
            return Ok(());
        }

        let order = self
            .store
            .update_status(item.order_id, item.created_at, OrderStatus::Processing)
            .await?;
        self.notify(&order, "Order Processing Started", "Your order is being processed")
            .await;

        let request = PaymentRequest {
            order_id: order.order_id,
            customer_id: order.customer_id.clone(),
            amount: order.total_amount,
        };
        let payment_reference = match self.payment.attempt(&request).await {
            StepOutcome::Success { reference_id } => {
                self.metrics
                    .incr("payments_processed_total", &[("status", "success")]);
                reference_id
            }
            StepOutcome::Failure { reason } => {
                self.metrics
                    .incr("payments_processed_total", &[("status", "failed")]);
                tracing::warn!(%reason, "payment step failed");
                return self.fail_order(&item, &reason).await;
            }
        };

        match self.inventory.attempt(order.order_id, &order.items).await {
            StepOutcome::Success { .. } => {
                self.metrics
                    .incr("inventory_updates_total", &[("status", "success")]);
                let order = self
                    .store
                    .update_status(item.order_id, item.created_at, OrderStatus::Completed)
                    .await?;
                tracing::info!("order completed");
                self.notify(
                    &order,
                    "Order Completed",
                    "Your order has been completed successfully",
                )
                .await;
                Ok(())
            }
            StepOutcome::Failure { reason } => {
                self.metrics
                    .incr("inventory_updates_total", &[("status", "failed")]);
                tracing::warn!(%reason, "inventory step failed, refunding payment");
                self.refund(&payment_reference).await;
                self.fail_order(&item, &reason).await
            }
        }
    }

    /// Compensates a captured payment.
    ///
    /// A failed refund leaves money captured for an order that will be
    /// FAILED; it is alerted for manual follow-up, never retried here.
    async fn refund(&self, payment_reference: &str) {
        match self.payment.refund(payment_reference).await {
            StepOutcome::Success { reference_id } => {
                self.metrics
                    .incr("payment_refunds_total", &[("status", "success")]);
                tracing::info!(payment = payment_reference, refund = %reference_id, "payment refunded");
            }
            StepOutcome::Failure { reason } => {
                self.metrics
                    .incr("payment_refunds_total", &[("status", "failed")]);
                tracing::error!(
                    payment = payment_reference,
                    %reason,
                    "refund failed, captured payment needs manual follow-up"
                );
            }
        }
    }

    async fn fail_order(&self, item: &WorkItem, reason: &str) -> Result<()> {
        let order = self
            .store
            .update_status(item.order_id, item.created_at, OrderStatus::Failed)
            .await?;
        self.notify(
            &order,
            "Order Failed",
            &format!("Your order could not be processed: {reason}"),
        )
        .await;
        Ok(())
    }

    /// Best-effort status notification. Publish failures are counted
    /// and logged, never propagated.
    async fn notify(&self, order: &Order, subject: &str, message: &str) {
        let event = StatusNotification {
            order_id: order.order_id,
            status: order.status,
            message: message.to_string(),
            customer_email: (!order.customer_email.is_empty())
                .then(|| order.customer_email.clone()),
        };
        if let Err(e) = self.notifier.publish(subject, &event).await {
            self.metrics.incr("notification_errors_total", &[]);
            tracing::warn!(
                order_id = %order.order_id,
                subject,
                error = %e,
                "notification publish failed"
            );
        }
    }
}
