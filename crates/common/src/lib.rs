//! Shared types for the order processing system.
//!
//! This crate provides the core data model shared between the intake,
//! retrieval, and saga layers:
//! - `OrderId` for type-safe order identification
//! - `Order` / `OrderItem` records and the `OrderStatus` state machine
//! - `WorkItem`, the message that triggers saga progression for one order

pub mod order;
pub mod types;
pub mod work_item;

pub use order::{InvalidStatus, Order, OrderItem, OrderStatus};
pub use types::OrderId;
pub use work_item::WorkItem;
