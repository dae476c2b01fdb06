//! Durable keyed store for order records.
//!
//! The store is an external collaborator: records are keyed by
//! `(order_id, created_at)` and queryable by id and by status. Its
//! conditional update semantics are the only concurrency-control
//! primitive the saga relies on.

pub mod error;
pub mod memory;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryOrderStore;
pub use store::OrderStore;
