//! Payment capture and refund.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::OrderId;
use rand::Rng;
use rust_decimal::Decimal;

use crate::outcome::StepOutcome;

/// A charge request for one order.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub order_id: OrderId,
    pub customer_id: String,
    pub amount: Decimal,
}

/// Payment capture and refund capability.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Attempts to capture the payment. Success carries a `PAY-` reference.
    async fn attempt(&self, request: &PaymentRequest) -> StepOutcome;

    /// Refunds a previously captured payment. Success carries a `REF-`
    /// reference.
    async fn refund(&self, payment_reference: &str) -> StepOutcome;
}

/// Gateway that simulates a payment provider.
///
/// Captures succeed with the configured probability after the
/// configured latency; refunds always succeed.
pub struct SimulatedPaymentGateway {
    success_rate: f64,
    latency: Duration,
}

impl SimulatedPaymentGateway {
    pub fn new(success_rate: f64, latency: Duration) -> Self {
        Self {
            success_rate: success_rate.clamp(0.0, 1.0),
            latency,
        }
    }
}

impl Default for SimulatedPaymentGateway {
    fn default() -> Self {
        Self::new(0.95, Duration::from_millis(500))
    }
}

fn reference(prefix: &str) -> String {
    // Drawn in a block so the rng never lives across an await.
    let n: u32 = rand::thread_rng().gen_range(100_000..=999_999);
    format!("{prefix}-{n}")
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn attempt(&self, request: &PaymentRequest) -> StepOutcome {
        tokio::time::sleep(self.latency).await;

        let approved = rand::thread_rng().gen_bool(self.success_rate);
        if approved {
            let reference = reference("PAY");
            tracing::info!(
                order_id = %request.order_id,
                amount = %request.amount,
                reference,
                "payment captured"
            );
            StepOutcome::success(reference)
        } else {
            tracing::warn!(order_id = %request.order_id, "payment declined");
            StepOutcome::failure("Payment declined")
        }
    }

    async fn refund(&self, payment_reference: &str) -> StepOutcome {
        tokio::time::sleep(self.latency).await;

        let reference = reference("REF");
        tracing::info!(payment = payment_reference, reference, "payment refunded");
        StepOutcome::success(reference)
    }
}

#[derive(Debug, Default)]
struct ScriptedPaymentState {
    fail_on_attempt: bool,
    fail_on_refund: bool,
    attempts: u32,
    refunds: Vec<String>,
}

/// Deterministic gateway for tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPaymentGateway {
    state: Arc<RwLock<ScriptedPaymentState>>,
}

impl ScriptedPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every capture attempt fail with "Payment declined".
    pub fn set_fail_on_attempt(&self, fail: bool) {
        self.state.write().unwrap().fail_on_attempt = fail;
    }

    /// Makes every refund fail.
    pub fn set_fail_on_refund(&self, fail: bool) {
        self.state.write().unwrap().fail_on_refund = fail;
    }

    /// Number of capture attempts seen so far.
    pub fn attempt_count(&self) -> u32 {
        self.state.read().unwrap().attempts
    }

    /// Payment references that were refunded, in order.
    pub fn refunded_references(&self) -> Vec<String> {
        self.state.read().unwrap().refunds.clone()
    }
}

#[async_trait]
impl PaymentGateway for ScriptedPaymentGateway {
    async fn attempt(&self, _request: &PaymentRequest) -> StepOutcome {
        let mut state = self.state.write().unwrap();
        state.attempts += 1;
        if state.fail_on_attempt {
            StepOutcome::failure("Payment declined")
        } else {
            StepOutcome::success(format!("PAY-{:04}", state.attempts))
        }
    }

    async fn refund(&self, payment_reference: &str) -> StepOutcome {
        let mut state = self.state.write().unwrap();
        if state.fail_on_refund {
            return StepOutcome::failure("Refund failed");
        }
        state.refunds.push(payment_reference.to_string());
        StepOutcome::success(format!("REF-{:04}", state.refunds.len()))
    }
}
