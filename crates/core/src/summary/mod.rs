//! Dashboard aggregations over transactions.

mod summary_calculator;
mod summary_model;

pub use summary_calculator::*;
pub use summary_model::*;
