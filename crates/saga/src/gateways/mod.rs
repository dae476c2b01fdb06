//! Payment and inventory capabilities the saga orchestrates.

pub mod inventory;
pub mod payment;

pub use inventory::{InventoryGateway, ScriptedInventoryGateway, SimulatedInventoryGateway};
pub use payment::{PaymentGateway, PaymentRequest, ScriptedPaymentGateway, SimulatedPaymentGateway};
