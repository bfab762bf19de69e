//! Category domain models, built-in defaults and record operations.

mod categories_model;
mod categories_service;
mod default_categories;

pub use categories_model::*;
pub use categories_service::*;
pub use default_categories::*;
