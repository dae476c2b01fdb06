//! Order payload validation and total computation.

use common::OrderItem;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Raw intake payload.
///
/// All fields are optional so that validation, not deserialization,
/// reports what is missing. The error messages are part of the
/// external contract.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub customer_id: Option<String>,
    pub items: Option<Vec<ItemPayload>>,
    pub customer_email: Option<String>,
    pub shipping_address: Option<serde_json::Value>,
}

/// Raw line item within an intake payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    pub product_id: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<Decimal>,
}

/// A payload that passed validation, ready to become an order.
#[derive(Debug, Clone)]
pub struct ValidatedOrder {
    pub customer_id: String,
    pub items: Vec<OrderItem>,
    pub customer_email: String,
    pub shipping_address: serde_json::Value,
}

/// Validates field presence and item constraints.
///
/// Fails fast on the first violation found, in field-then-item order;
/// the returned reason is a human-readable message naming the
/// offending field or item index.
pub fn validate(payload: &OrderPayload) -> Result<ValidatedOrder, String> {
    let customer_id = payload
        .customer_id
        .clone()
        .ok_or("Missing required field: customerId")?;

    let raw_items = payload
        .items
        .as_ref()
        .ok_or("Missing required field: items")?;
    if raw_items.is_empty() {
        return Err("Items must be a non-empty array".to_string());
    }

    let mut items = Vec::with_capacity(raw_items.len());
    for (idx, item) in raw_items.iter().enumerate() {
        let product_id = item
            .product_id
            .clone()
            .ok_or_else(|| format!("Item {idx} missing productId"))?;

        let quantity = match item.quantity {
            Some(q) if q > 0 => u32::try_from(q)
                .map_err(|_| format!("Item {idx} must have positive quantity"))?,
            _ => return Err(format!("Item {idx} must have positive quantity")),
        };

        let price = match item.price {
            Some(p) if p > Decimal::ZERO => p,
            _ => return Err(format!("Item {idx} must have positive price")),
        };

        items.push(OrderItem::new(product_id, quantity, price));
    }

    Ok(ValidatedOrder {
        customer_id,
        items,
        customer_email: payload.customer_email.clone().unwrap_or_default(),
        shipping_address: payload
            .shipping_address
            .clone()
            .unwrap_or_else(|| serde_json::json!({})),
    })
}

/// Sums `quantity x price` over the items using exact decimal
/// arithmetic. The only place a total is ever computed.
pub fn compute_total(items: &[OrderItem]) -> Decimal {
    items
        .iter()
        .map(|item| Decimal::from(item.quantity) * item.price)
        .sum()
}
