//! Order read path: lookup by id and filtered listing.

use common::{Order, OrderId, OrderStatus};
use order_store::OrderStore;

use crate::error::DomainError;

/// Default page size when the caller does not specify a limit.
pub const DEFAULT_LIMIT: usize = 50;

/// Hard cap on the page size.
pub const MAX_LIMIT: usize = 100;

/// Read-only order queries over the store.
pub struct OrderRetrievalService<S> {
    store: S,
}

impl<S: OrderStore> OrderRetrievalService<S> {
    /// Creates a new retrieval service.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Looks up a single order by its ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, order_id: OrderId) -> Result<Order, DomainError> {
        self.store
            .get_by_id(order_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(order_id.to_string()))
    }

    /// Lists orders, optionally filtered by status.
    ///
    /// The filter is parsed case-insensitively; filtered results come
    /// back most recent first, an unfiltered scan in unspecified order.
    /// Returns the parsed filter alongside the orders.
    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        status_filter: Option<&str>,
        limit: Option<usize>,
    ) -> Result<(Vec<Order>, Option<OrderStatus>), DomainError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

        match status_filter {
            Some(raw) => {
                let status: OrderStatus = raw
                    .parse()
                    .map_err(|e: common::InvalidStatus| DomainError::InvalidParameter(e.to_string()))?;
                let orders = self.store.query_by_status(status, limit).await?;
                Ok((orders, Some(status)))
            }
            None => Ok((self.store.scan(limit).await?, None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use common::OrderItem;
    use order_store::InMemoryOrderStore;
    use rust_decimal::Decimal;

    fn order(status: OrderStatus, age_seconds: i64) -> Order {
        let created_at = Utc::now() - Duration::seconds(age_seconds);
        Order {
            order_id: OrderId::new(),
            created_at,
            customer_id: "c1".to_string(),
            items: vec![OrderItem::new("p1", 1, Decimal::ONE)],
            total_amount: Decimal::ONE,
            status,
            updated_at: created_at,
            customer_email: String::new(),
            shipping_address: serde_json::json!({}),
        }
    }

    async fn seeded() -> OrderRetrievalService<InMemoryOrderStore> {
        let store = InMemoryOrderStore::new();
        store.put(order(OrderStatus::Pending, 30)).await.unwrap();
        store.put(order(OrderStatus::Pending, 10)).await.unwrap();
        store.put(order(OrderStatus::Completed, 20)).await.unwrap();
        OrderRetrievalService::new(store)
    }

    #[tokio::test]
    async fn get_by_id_returns_the_order() {
        let store = InMemoryOrderStore::new();
        let stored = order(OrderStatus::Pending, 0);
        let id = stored.order_id;
        store.put(stored.clone()).await.unwrap();

        let service = OrderRetrievalService::new(store);
        let found = service.get_by_id(id).await.unwrap();
        assert_eq!(found, stored);
    }

    #[tokio::test]
    async fn get_by_id_unknown_is_not_found() {
        let service = OrderRetrievalService::new(InMemoryOrderStore::new());
        let id = OrderId::new();
        let err = service.get_by_id(id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(err.to_string(), format!("Order {id} not found"));
    }

    #[tokio::test]
    async fn list_filtered_returns_newest_first() {
        let service = seeded().await;
        let (orders, filter) = service.list(Some("PENDING"), None).await.unwrap();

        assert_eq!(filter, Some(OrderStatus::Pending));
        assert_eq!(orders.len(), 2);
        assert!(orders[0].created_at >= orders[1].created_at);
    }

    #[tokio::test]
    async fn list_filter_is_case_insensitive() {
        let service = seeded().await;
        let (orders, filter) = service.list(Some("completed"), None).await.unwrap();
        assert_eq!(filter, Some(OrderStatus::Completed));
        assert_eq!(orders.len(), 1);
    }

    #[tokio::test]
    async fn list_invalid_filter_is_rejected() {
        let service = seeded().await;
        let err = service.list(Some("bogus"), None).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidParameter(_)));
        assert_eq!(
            err.to_string(),
            "Status must be one of: PENDING, PROCESSING, COMPLETED, FAILED"
        );
    }

    #[tokio::test]
    async fn list_unfiltered_scans_everything() {
        let service = seeded().await;
        let (orders, filter) = service.list(None, None).await.unwrap();
        assert_eq!(orders.len(), 3);
        assert!(filter.is_none());
    }

    #[tokio::test]
    async fn limit_is_applied_and_capped() {
        let store = InMemoryOrderStore::new();
        for i in 0..120 {
            store.put(order(OrderStatus::Pending, i)).await.unwrap();
        }
        let service = OrderRetrievalService::new(store);

        let (orders, _) = service.list(None, Some(5)).await.unwrap();
        assert_eq!(orders.len(), 5);

        // Requests beyond the cap are clamped to MAX_LIMIT.
        let (orders, _) = service.list(Some("PENDING"), Some(500)).await.unwrap();
        assert_eq!(orders.len(), MAX_LIMIT);
    }
}
