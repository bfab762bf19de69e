//! Local snapshot of transactions and categories recorded before sign-up.

mod model;
mod repository;

pub use model::{
    LocalCategoryDB, LocalTransactionDB, CATEGORIES_KEY, MIGRATION_COMPLETED_KEY,
    TRANSACTIONS_KEY,
};
pub use repository::LocalSnapshotStore;
