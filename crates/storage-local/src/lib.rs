//! SQLite-backed local storage for the finance tracker.
//!
//! Values live in a single key/value table, mirroring the browser storage the
//! app used before cloud accounts existed. The snapshot repository reads and
//! writes the transaction and category collections stored there.

pub mod db;
pub mod errors;
pub mod key_value;
pub mod snapshot;

pub use errors::{Result, StorageError};
pub use key_value::KeyValueStore;
pub use snapshot::{
    LocalSnapshotStore, CATEGORIES_KEY, MIGRATION_COMPLETED_KEY, TRANSACTIONS_KEY,
};
