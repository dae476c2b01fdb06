//! Order intake: validate, persist, enqueue.

use chrono::Utc;
use common::{Order, OrderId, OrderStatus, WorkItem};
use messaging::{MetricsSink, WorkQueue};
use order_store::OrderStore;
use rust_decimal::prelude::ToPrimitive;

use crate::error::DomainError;
use crate::validator::{self, OrderPayload};

/// Accepts order payloads, persists them, and publishes a work item
/// onto the processing channel.
pub struct OrderIntakeService<S, Q, M> {
    store: S,
    queue: Q,
    metrics: M,
}

impl<S, Q, M> OrderIntakeService<S, Q, M>
where
    S: OrderStore,
    Q: WorkQueue<WorkItem>,
    M: MetricsSink,
{
    /// Creates a new intake service.
    pub fn new(store: S, queue: Q, metrics: M) -> Self {
        Self {
            store,
            queue,
            metrics,
        }
    }

    /// Validates and creates a new order.
    ///
    /// The store write happens strictly before the queue publish, so a
    /// consumer that reads the store after receiving the work item
    /// always observes a PENDING record. A publish failure after the
    /// write leaves the order parked in PENDING with nothing to advance
    /// it; there is no outbox to recover it.
    #[tracing::instrument(skip(self, payload))]
    pub async fn submit(&self, payload: OrderPayload) -> Result<Order, DomainError> {
        let validated = match validator::validate(&payload) {
            Ok(v) => v,
            Err(reason) => {
                self.metrics
                    .incr("order_creation_errors_total", &[("reason", "validation")]);
                return Err(DomainError::Validation(reason));
            }
        };

        let total_amount = validator::compute_total(&validated.items);
        let now = Utc::now();
        let order = Order {
            order_id: OrderId::new(),
            created_at: now,
            customer_id: validated.customer_id,
            items: validated.items,
            total_amount,
            status: OrderStatus::Pending,
            updated_at: now,
            customer_email: validated.customer_email,
            shipping_address: validated.shipping_address,
        };

        if let Err(e) = self.store.put(order.clone()).await {
            self.metrics
                .incr("order_creation_errors_total", &[("reason", "store")]);
            return Err(e.into());
        }

        if let Err(e) = self.queue.publish(WorkItem::from(&order)).await {
            tracing::error!(
                order_id = %order.order_id,
                error = %e,
                "work item publish failed after store write; order parked in PENDING"
            );
            self.metrics
                .incr("order_creation_errors_total", &[("reason", "publish")]);
            return Err(e.into());
        }

        self.metrics.incr("orders_created_total", &[]);
        self.metrics
            .gauge("order_value", total_amount.to_f64().unwrap_or_default());
        tracing::info!(
            order_id = %order.order_id,
            total = %order.total_amount,
            "order created"
        );
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::ItemPayload;
    use async_trait::async_trait;
    use messaging::{ChannelError, InMemoryWorkQueue, RecordingSink};
    use order_store::InMemoryOrderStore;
    use rust_decimal::Decimal;
    use std::time::Duration;

    fn payload() -> OrderPayload {
        OrderPayload {
            customer_id: Some("c1".to_string()),
            items: Some(vec![ItemPayload {
                product_id: Some("p1".to_string()),
                quantity: Some(2),
                price: Some("10.00".parse().unwrap()),
            }]),
            customer_email: Some("c1@example.com".to_string()),
            shipping_address: None,
        }
    }

    fn service() -> (
        OrderIntakeService<InMemoryOrderStore, InMemoryWorkQueue<WorkItem>, RecordingSink>,
        InMemoryOrderStore,
        InMemoryWorkQueue<WorkItem>,
        RecordingSink,
    ) {
        let store = InMemoryOrderStore::new();
        let queue = InMemoryWorkQueue::new();
        let sink = RecordingSink::new();
        let service = OrderIntakeService::new(store.clone(), queue.clone(), sink.clone());
        (service, store, queue, sink)
    }

    #[tokio::test]
    async fn submit_persists_pending_order_and_publishes_work_item() {
        let (service, store, queue, sink) = service();

        let order = service.submit(payload()).await.unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, "20.00".parse::<Decimal>().unwrap());
        assert_eq!(order.updated_at, order.created_at);

        let stored = store.get_by_id(order.order_id).await.unwrap().unwrap();
        assert_eq!(stored, order);

        let batch = queue.next_batch(10, Duration::from_millis(10)).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0], WorkItem::from(&order));

        assert_eq!(sink.count("orders_created_total"), 1);
        assert_eq!(sink.gauge_values("order_value"), vec![20.0]);
    }

    #[tokio::test]
    async fn validation_failure_never_touches_the_store() {
        let (service, store, queue, sink) = service();
        let bad = OrderPayload {
            customer_id: Some("c1".to_string()),
            items: Some(vec![]),
            ..Default::default()
        };

        let err = service.submit(bad).await.unwrap_err();
        assert!(
            matches!(err, DomainError::Validation(ref reason) if reason == "Items must be a non-empty array")
        );

        assert_eq!(store.order_count().await, 0);
        assert!(queue.is_empty().await);
        assert_eq!(sink.count("order_creation_errors_total"), 1);
        assert_eq!(sink.count("orders_created_total"), 0);
    }

    struct FailingQueue;

    #[async_trait]
    impl WorkQueue<WorkItem> for FailingQueue {
        async fn publish(&self, _message: WorkItem) -> Result<(), ChannelError> {
            Err(ChannelError::Publish("queue unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn publish_failure_leaves_pending_order_stranded() {
        let store = InMemoryOrderStore::new();
        let sink = RecordingSink::new();
        let service = OrderIntakeService::new(store.clone(), FailingQueue, sink.clone());

        let err = service.submit(payload()).await.unwrap_err();
        assert!(matches!(err, DomainError::Channel(_)));

        // The store write already happened; the record stays PENDING.
        assert_eq!(store.order_count().await, 1);
        let stranded = store.scan(1).await.unwrap().remove(0);
        assert_eq!(stranded.status, OrderStatus::Pending);
        assert_eq!(
            sink.count_with("order_creation_errors_total", ("reason", "publish")),
            1
        );
    }

    #[tokio::test]
    async fn distinct_submissions_get_distinct_ids() {
        let (service, _, _, _) = service();
        let first = service.submit(payload()).await.unwrap();
        let second = service.submit(payload()).await.unwrap();
        assert_ne!(first.order_id, second.order_id);
    }
}
