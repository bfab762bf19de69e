//! Domain core for the finance tracker.
//!
//! Holds the category/transaction models, the collaborator traits the
//! persistence layers implement, the local-to-cloud migration logic and the
//! dashboard summary computations.

pub mod categories;
pub mod errors;
pub mod store;
pub mod summary;
pub mod sync;
pub mod transactions;

pub use errors::{Error, Result};
