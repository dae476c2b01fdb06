//! Order intake and read-path services.
//!
//! This crate provides:
//! - `validator`: payload validation and exact total computation
//! - `OrderIntakeService`: validate, persist, enqueue
//! - `OrderRetrievalService`: lookup by id and filtered listing

pub mod error;
pub mod intake;
pub mod retrieval;
pub mod validator;

pub use error::DomainError;
pub use intake::OrderIntakeService;
pub use retrieval::{DEFAULT_LIMIT, MAX_LIMIT, OrderRetrievalService};
pub use validator::{ItemPayload, OrderPayload, ValidatedOrder, compute_total, validate};
