//! The message that triggers saga progression for one order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::order::Order;
use crate::types::OrderId;

/// Work item published to the processing channel at intake.
///
/// A derived, disposable projection of [`Order`], not an independent
/// entity. It carries enough to resume saga execution without re-reading
/// the store, though the saga re-reads for the current status anyway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub order_id: OrderId,
    pub created_at: DateTime<Utc>,
    pub customer_id: String,
    pub total_amount: Decimal,
}

impl From<&Order> for WorkItem {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.order_id,
            created_at: order.created_at,
            customer_id: order.customer_id.clone(),
            total_amount: order.total_amount,
        }
    }
}
