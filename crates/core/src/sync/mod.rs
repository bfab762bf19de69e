//! Local-to-cloud migration, category reconciliation and cloud pull.

mod category_reconciler;
mod local_snapshot_model;
mod migration_model;
mod migration_service;
mod transaction_remapper;

pub use category_reconciler::*;
pub use local_snapshot_model::*;
pub use migration_model::*;
pub use migration_service::*;
pub use transaction_remapper::*;
