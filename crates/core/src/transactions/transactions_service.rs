use std::sync::Arc;

use log::debug;

use crate::errors::{Error, Result};
use crate::store::RemoteStoreTrait;
use crate::transactions::{normalize_optional_text, NewTransaction, Transaction, TransactionUpdate};

/// Validated transaction operations against the hosted store.
pub struct TransactionService {
    remote: Arc<dyn RemoteStoreTrait>,
}

impl TransactionService {
    pub fn new(remote: Arc<dyn RemoteStoreTrait>) -> Self {
        Self { remote }
    }

    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.remote.list_transactions().await
    }

    pub async fn create_transaction(&self, transaction: NewTransaction) -> Result<Transaction> {
        transaction.validate()?;
        let transaction = NewTransaction {
            comment: normalize_optional_text(transaction.comment.as_deref()),
            ..transaction
        };
        debug!(
            "Creating {} transaction of {} on {}",
            transaction.transaction_type, transaction.amount, transaction.date
        );
        self.remote.create_transaction(transaction).await
    }

    pub async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        if update.is_empty() {
            return Err(Error::validation("Nothing to update"));
        }
        update.validate()?;
        self.remote.update_transaction(transaction_id, update).await
    }

    pub async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        debug!("Deleting transaction {}", transaction_id);
        self.remote.delete_transaction(transaction_id).await
    }
}
