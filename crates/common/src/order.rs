//! Order record and the status state machine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::OrderId;

/// Lifecycle status of an order.
///
/// Transitions are monotonic and one-directional:
/// `Pending -> Processing -> Completed | Failed`. `Completed` and
/// `Failed` are terminal. A same-status write is allowed as an
/// idempotent no-op so that redelivered work items are harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl OrderStatus {
    /// All valid statuses, in lifecycle order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Failed,
    ];

    /// Returns true once no further transitions are allowed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Failed)
    }

    /// Returns true if a write from `self` to `next` is allowed.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Processing)
                | (OrderStatus::Processing, OrderStatus::Completed)
                | (OrderStatus::Processing, OrderStatus::Failed)
        )
    }

    /// Returns the wire representation, e.g. `"PENDING"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatus;

impl std::fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Status must be one of: PENDING, PROCESSING, COMPLETED, FAILED")
    }
}

impl std::error::Error for InvalidStatus {}

impl std::str::FromStr for OrderStatus {
    type Err = InvalidStatus;

    /// Case-insensitive parse of the wire representation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "PROCESSING" => Ok(OrderStatus::Processing),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "FAILED" => Ok(OrderStatus::Failed),
            _ => Err(InvalidStatus),
        }
    }
}

/// A single line item in an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// The product identifier.
    pub product_id: String,

    /// Quantity ordered, always positive.
    pub quantity: u32,

    /// Price per unit as an exact decimal.
    pub price: Decimal,
}

impl OrderItem {
    /// Creates a new order item.
    pub fn new(product_id: impl Into<String>, quantity: u32, price: Decimal) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            price,
        }
    }
}

/// A stored order record.
///
/// `(order_id, created_at)` form the store's composite key. Only
/// `status` and `updated_at` may change after creation; in particular
/// `items` and `total_amount` are fixed at intake and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub created_at: DateTime<Utc>,
    pub customer_id: String,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub updated_at: DateTime<Utc>,
    pub customer_email: String,
    pub shipping_address: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
    }

    #[test]
    fn allowed_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Processing));
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Completed));
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Failed));
    }

    #[test]
    fn same_status_is_allowed_as_noop() {
        for status in OrderStatus::ALL {
            assert!(status.can_transition_to(status));
        }
    }

    #[test]
    fn regressions_and_skips_are_rejected() {
        // No write may skip Processing or move backwards.
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Failed));
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Failed));
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Processing));
        assert!(!OrderStatus::Failed.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::Failed.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn status_serializes_screaming_snake() {
        let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
        let parsed: OrderStatus = serde_json::from_str("\"FAILED\"").unwrap();
        assert_eq!(parsed, OrderStatus::Failed);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("pending".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!("Completed".parse::<OrderStatus>().unwrap(), OrderStatus::Completed);
        assert_eq!(
            "PROCESSING".parse::<OrderStatus>().unwrap(),
            OrderStatus::Processing
        );
        assert!("bogus".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn invalid_status_names_the_valid_set() {
        let err = "bogus".parse::<OrderStatus>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Status must be one of: PENDING, PROCESSING, COMPLETED, FAILED"
        );
    }

    #[test]
    fn order_item_serializes_camel_case() {
        let item = OrderItem::new("p1", 2, Decimal::new(1000, 2));
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("productId").is_some());
        assert_eq!(json["quantity"], 2);
    }
}
