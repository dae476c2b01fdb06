//! Order processing saga.
//!
//! Consumes work items published at intake and drives each order
//! through payment capture and inventory reservation, compensating
//! with a refund when inventory fails after a captured payment.

pub mod error;
pub mod gateways;
pub mod outcome;
pub mod processor;
pub mod worker;

pub use error::{Result, SagaError};
pub use gateways::{
    InventoryGateway, PaymentGateway, PaymentRequest, ScriptedInventoryGateway,
    ScriptedPaymentGateway, SimulatedInventoryGateway, SimulatedPaymentGateway,
};
pub use outcome::StepOutcome;
pub use processor::{BatchItemResult, BatchItemStatus, OrderSaga};
pub use worker::{BATCH_SIZE, POLL_TIMEOUT, SagaWorker};
