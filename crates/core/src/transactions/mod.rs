//! Transaction domain models and record operations.

mod transactions_model;
mod transactions_service;

pub use transactions_model::*;
pub use transactions_service::*;
