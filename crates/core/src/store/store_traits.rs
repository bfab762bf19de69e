use async_trait::async_trait;

use crate::categories::{Category, CategoryUpdate, NewCategory};
use crate::errors::Result;
use crate::sync::{LocalCategory, LocalTransaction};
use crate::transactions::{NewTransaction, Transaction, TransactionType, TransactionUpdate};

/// Hosted persistence for the signed-in user's categories and transactions.
///
/// Every call is a single request; implementations do not retry.
#[async_trait]
pub trait RemoteStoreTrait: Send + Sync {
    /// All categories, ordered by type then name.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// All transactions, newest first, with their category joined in.
    async fn list_transactions(&self) -> Result<Vec<Transaction>>;

    /// Inserts all categories in one request and returns the stored rows.
    async fn bulk_insert_categories(&self, categories: Vec<NewCategory>) -> Result<Vec<Category>>;

    /// Inserts all transactions in one request and returns the stored rows.
    async fn bulk_insert_transactions(
        &self,
        transactions: Vec<NewTransaction>,
    ) -> Result<Vec<Transaction>>;

    async fn create_category(&self, category: NewCategory) -> Result<Category>;

    async fn update_category(&self, category_id: &str, update: CategoryUpdate) -> Result<Category>;

    /// Deletes a custom category. Default categories are never deleted.
    async fn delete_category(&self, category_id: &str) -> Result<()>;

    /// Looks up a category by its composite key.
    async fn find_category(
        &self,
        category_type: TransactionType,
        name: &str,
    ) -> Result<Option<Category>>;

    async fn create_transaction(&self, transaction: NewTransaction) -> Result<Transaction>;

    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;

    async fn delete_transaction(&self, transaction_id: &str) -> Result<()>;
}

/// Client-local key-value storage holding data entered before any remote
/// account existed.
pub trait LocalSnapshotStoreTrait: Send + Sync {
    /// Local transactions, each referencing its category by name.
    fn read_local_transactions(&self) -> Result<Vec<LocalTransaction>>;

    fn read_local_categories(&self) -> Result<Vec<LocalCategory>>;

    /// Raw stored records, untouched, for backups.
    fn read_raw_transactions(&self) -> Result<Vec<serde_json::Value>>;

    fn read_raw_categories(&self) -> Result<Vec<serde_json::Value>>;

    /// Removes both collections. Leaves the migration marker alone.
    fn clear_local_snapshot(&self) -> Result<()>;

    fn is_migration_completed(&self) -> Result<bool>;

    fn set_migration_completed(&self, completed: bool) -> Result<()>;
}
