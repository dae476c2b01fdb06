//! Batch consumer pulling work items off the queue.

use std::time::Duration;

use common::WorkItem;
use messaging::{InMemoryWorkQueue, MetricsSink, NotificationChannel};
use order_store::OrderStore;

use crate::gateways::{InventoryGateway, PaymentGateway};
use crate::processor::{BatchItemResult, BatchItemStatus, OrderSaga};

/// Maximum work items handed to the saga per batch.
pub const BATCH_SIZE: usize = 10;

/// How long a poll waits before returning an empty batch.
pub const POLL_TIMEOUT: Duration = Duration::from_secs(1);

/// Long-running consumer that feeds queue batches to the saga.
pub struct SagaWorker<S, P, I, N, M> {
    queue: InMemoryWorkQueue<WorkItem>,
    saga: OrderSaga<S, P, I, N, M>,
}

impl<S, P, I, N, M> SagaWorker<S, P, I, N, M>
where
    S: OrderStore,
    P: PaymentGateway,
    I: InventoryGateway,
    N: NotificationChannel,
    M: MetricsSink,
{
    pub fn new(queue: InMemoryWorkQueue<WorkItem>, saga: OrderSaga<S, P, I, N, M>) -> Self {
        Self { queue, saga }
    }

    /// Consumes batches until the queue is closed and drained.
    pub async fn run(self) {
        tracing::info!("saga worker started");
        loop {
            let batch = self.queue.next_batch(BATCH_SIZE, POLL_TIMEOUT).await;
            if batch.is_empty() {
                if self.queue.is_closed() {
                    break;
                }
                continue;
            }

            let results = self.saga.process_batch(batch).await;
            let failed = results
                .iter()
                .filter(|r| r.status == BatchItemStatus::Failed)
                .count();
            if failed > 0 {
                tracing::warn!(failed, total = results.len(), "batch finished with failures");
            }
        }
        tracing::info!("saga worker stopped");
    }

    /// Processes everything currently queued without waiting for more.
    ///
    /// Test hook: lets a caller run the consumer side synchronously.
    pub async fn drain(&self) -> Vec<BatchItemResult> {
        let mut results = Vec::new();
        loop {
            let batch = self.queue.next_batch(BATCH_SIZE, Duration::ZERO).await;
            if batch.is_empty() {
                break;
            }
            results.extend(self.saga.process_batch(batch).await);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::{Order, OrderId, OrderItem, OrderStatus};
    use messaging::{RecordingNotifier, RecordingSink, WorkQueue};
    use order_store::InMemoryOrderStore;
    use rust_decimal::Decimal;

    use crate::gateways::{ScriptedInventoryGateway, ScriptedPaymentGateway};

    fn worker_with_store() -> (
        SagaWorker<
            InMemoryOrderStore,
            ScriptedPaymentGateway,
            ScriptedInventoryGateway,
            RecordingNotifier,
            RecordingSink,
        >,
        InMemoryOrderStore,
        InMemoryWorkQueue<WorkItem>,
    ) {
        let store = InMemoryOrderStore::new();
        let queue = InMemoryWorkQueue::new();
        let saga = OrderSaga::new(
            store.clone(),
            ScriptedPaymentGateway::new(),
            ScriptedInventoryGateway::new(),
            RecordingNotifier::new(),
            RecordingSink::new(),
        );
        (SagaWorker::new(queue.clone(), saga), store, queue)
    }

    async fn seed_order(store: &InMemoryOrderStore) -> WorkItem {
        let now = Utc::now();
        let order = Order {
            order_id: OrderId::new(),
            created_at: now,
            customer_id: "c1".to_string(),
            items: vec![OrderItem::new("p1", 1, Decimal::new(500, 2))],
            total_amount: Decimal::new(500, 2),
            status: OrderStatus::Pending,
            updated_at: now,
            customer_email: String::new(),
            shipping_address: serde_json::json!({}),
        };
        let item = WorkItem::from(&order);
        store.put(order).await.unwrap();
        item
    }

    #[tokio::test]
    async fn drain_processes_everything_queued() {
        let (worker, store, queue) = worker_with_store();
        let mut items = Vec::new();
        for _ in 0..3 {
            let item = seed_order(&store).await;
            queue.publish(item.clone()).await.unwrap();
            items.push(item);
        }

        let results = worker.drain().await;

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.status == BatchItemStatus::Success));
        for item in items {
            let order = store.get_by_id(item.order_id).await.unwrap().unwrap();
            assert_eq!(order.status, OrderStatus::Completed);
        }
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn run_consumes_then_stops_on_close() {
        let (worker, store, queue) = worker_with_store();
        let item = seed_order(&store).await;
        queue.publish(item.clone()).await.unwrap();

        let handle = tokio::spawn(worker.run());
        // Close after the published item; run drains it and exits.
        queue.close();
        handle.await.unwrap();

        let order = store.get_by_id(item.order_id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
    }
}
