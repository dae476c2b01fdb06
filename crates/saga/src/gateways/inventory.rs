//! Inventory reservation.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::{OrderId, OrderItem};
use rand::Rng;

use crate::outcome::StepOutcome;

/// Inventory reservation capability.
#[async_trait]
pub trait InventoryGateway: Send + Sync {
    /// Attempts to reserve stock for every item of the order.
    async fn attempt(&self, order_id: OrderId, items: &[OrderItem]) -> StepOutcome;
}

/// Gateway that simulates an inventory system.
pub struct SimulatedInventoryGateway {
    success_rate: f64,
    latency: Duration,
}

impl SimulatedInventoryGateway {
    pub fn new(success_rate: f64, latency: Duration) -> Self {
        Self {
            success_rate: success_rate.clamp(0.0, 1.0),
            latency,
        }
    }
}

impl Default for SimulatedInventoryGateway {
    fn default() -> Self {
        Self::new(0.98, Duration::from_millis(300))
    }
}

#[async_trait]
impl InventoryGateway for SimulatedInventoryGateway {
    async fn attempt(&self, order_id: OrderId, items: &[OrderItem]) -> StepOutcome {
        tokio::time::sleep(self.latency).await;

        let reserved = rand::thread_rng().gen_bool(self.success_rate);
        if reserved {
            let n: u32 = rand::thread_rng().gen_range(100_000..=999_999);
            let reference = format!("RSV-{n}");
            tracing::info!(%order_id, item_count = items.len(), reference, "inventory reserved");
            StepOutcome::success(reference)
        } else {
            tracing::warn!(%order_id, "inventory reservation failed");
            StepOutcome::failure("Insufficient inventory")
        }
    }
}

#[derive(Debug, Default)]
struct ScriptedInventoryState {
    fail_on_attempt: bool,
    attempts: u32,
}

/// Deterministic gateway for tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInventoryGateway {
    state: Arc<RwLock<ScriptedInventoryState>>,
}

impl ScriptedInventoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every reservation fail with "Insufficient inventory".
    pub fn set_fail_on_attempt(&self, fail: bool) {
        self.state.write().unwrap().fail_on_attempt = fail;
    }

    /// Number of reservation attempts seen so far.
    pub fn attempt_count(&self) -> u32 {
        self.state.read().unwrap().attempts
    }
}

#[async_trait]
impl InventoryGateway for ScriptedInventoryGateway {
    async fn attempt(&self, _order_id: OrderId, _items: &[OrderItem]) -> StepOutcome {
        let mut state = self.state.write().unwrap();
        state.attempts += 1;
        if state.fail_on_attempt {
            StepOutcome::failure("Insufficient inventory")
        } else {
            StepOutcome::success(format!("RSV-{:04}", state.attempts))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn items() -> Vec<OrderItem> {
        vec![OrderItem::new("p1", 2, Decimal::new(1000, 2))]
    }

    #[tokio::test]
    async fn simulated_gateway_at_full_rate_always_reserves() {
        let gateway = SimulatedInventoryGateway::new(1.0, Duration::ZERO);
        let outcome = gateway.attempt(OrderId::new(), &items()).await;
        assert!(outcome.reference_id().unwrap().starts_with("RSV-"));
    }

    #[tokio::test]
    async fn simulated_gateway_at_zero_rate_always_fails() {
        let gateway = SimulatedInventoryGateway::new(0.0, Duration::ZERO);
        let outcome = gateway.attempt(OrderId::new(), &items()).await;
        assert_eq!(outcome.failure_reason(), Some("Insufficient inventory"));
    }

    #[tokio::test]
    async fn scripted_gateway_is_switchable() {
        let gateway = ScriptedInventoryGateway::new();
        assert!(gateway.attempt(OrderId::new(), &items()).await.is_success());

        gateway.set_fail_on_attempt(true);
        let outcome = gateway.attempt(OrderId::new(), &items()).await;
        assert_eq!(outcome.failure_reason(), Some("Insufficient inventory"));
        assert_eq!(gateway.attempt_count(), 2);
    }
}
