//! In-memory collaborators for core tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::categories::{Category, CategorySummary, CategoryUpdate, NewCategory};
use crate::errors::{Error, Result};
use crate::store::{LocalSnapshotStoreTrait, RemoteStoreTrait};
use crate::sync::{LocalCategory, LocalTransaction};
use crate::transactions::{NewTransaction, Transaction, TransactionType, TransactionUpdate};

#[derive(Debug, Default)]
pub(crate) struct FakeRemoteState {
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub next_category_id: usize,
    pub next_transaction_id: usize,
    pub fail_list_categories: Option<String>,
    pub fail_list_transactions: Option<String>,
    pub fail_category_insert: Option<String>,
    pub fail_transaction_insert: Option<String>,
    pub category_insert_calls: usize,
    pub transaction_insert_calls: usize,
}

#[derive(Debug, Default)]
pub(crate) struct FakeRemoteStore {
    pub state: Mutex<FakeRemoteState>,
}

impl FakeRemoteStore {
    pub fn with_categories(categories: Vec<Category>) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().categories = categories;
        store
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state.lock().unwrap().categories.clone()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().transactions.clone()
    }

    fn store_category(state: &mut FakeRemoteState, category: NewCategory) -> Category {
        state.next_category_id += 1;
        let stored = Category {
            id: format!("c{}", state.next_category_id),
            category_type: category.category_type,
            name: category.name,
            description: category.description,
            is_default: category.is_default,
            created_at: None,
        };
        state.categories.push(stored.clone());
        stored
    }

    fn store_transaction(state: &mut FakeRemoteState, transaction: NewTransaction) -> Transaction {
        state.next_transaction_id += 1;
        let category = state
            .categories
            .iter()
            .find(|c| c.id == transaction.category_id.as_str())
            .map(|c| CategorySummary {
                id: c.id.clone(),
                name: c.name.clone(),
                category_type: c.category_type,
            });
        let stored = Transaction {
            id: format!("t{}", state.next_transaction_id),
            transaction_type: transaction.transaction_type,
            amount: transaction.amount,
            date: transaction.date,
            category_id: transaction.category_id,
            comment: transaction.comment,
            category,
            created_at: None,
        };
        state.transactions.push(stored.clone());
        stored
    }
}

#[async_trait]
impl RemoteStoreTrait for FakeRemoteStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let state = self.state.lock().unwrap();
        if let Some(message) = &state.fail_list_categories {
            return Err(Error::remote(message.clone()));
        }
        Ok(state.categories.clone())
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let state = self.state.lock().unwrap();
        if let Some(message) = &state.fail_list_transactions {
            return Err(Error::remote(message.clone()));
        }
        Ok(state.transactions.clone())
    }

    async fn bulk_insert_categories(&self, categories: Vec<NewCategory>) -> Result<Vec<Category>> {
        let mut state = self.state.lock().unwrap();
        state.category_insert_calls += 1;
        if let Some(message) = &state.fail_category_insert {
            return Err(Error::remote_with_status(500, message.clone()));
        }
        Ok(categories
            .into_iter()
            .map(|c| Self::store_category(&mut state, c))
            .collect())
    }

    async fn bulk_insert_transactions(
        &self,
        transactions: Vec<NewTransaction>,
    ) -> Result<Vec<Transaction>> {
        let mut state = self.state.lock().unwrap();
        state.transaction_insert_calls += 1;
        if let Some(message) = &state.fail_transaction_insert {
            return Err(Error::remote(message.clone()));
        }
        Ok(transactions
            .into_iter()
            .map(|t| Self::store_transaction(&mut state, t))
            .collect())
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category> {
        let mut state = self.state.lock().unwrap();
        Ok(Self::store_category(&mut state, category))
    }

    async fn update_category(&self, category_id: &str, update: CategoryUpdate) -> Result<Category> {
        let mut state = self.state.lock().unwrap();
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or_else(|| Error::remote_with_status(404, "not found"))?;
        if let Some(name) = update.name {
            category.name = name;
        }
        if let Some(description) = update.description {
            category.description = Some(description).filter(|d| !d.is_empty());
        }
        Ok(category.clone())
    }

    async fn delete_category(&self, category_id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state
            .categories
            .retain(|c| c.id != category_id || c.is_default);
        Ok(())
    }

    async fn find_category(
        &self,
        category_type: TransactionType,
        name: &str,
    ) -> Result<Option<Category>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .categories
            .iter()
            .find(|c| c.category_type == category_type && c.name == name)
            .cloned())
    }

    async fn create_transaction(&self, transaction: NewTransaction) -> Result<Transaction> {
        let mut state = self.state.lock().unwrap();
        Ok(Self::store_transaction(&mut state, transaction))
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let mut state = self.state.lock().unwrap();
        let transaction = state
            .transactions
            .iter_mut()
            .find(|t| t.id == transaction_id)
            .ok_or_else(|| Error::remote_with_status(404, "not found"))?;
        if let Some(amount) = update.amount {
            transaction.amount = amount;
        }
        if let Some(comment) = update.comment {
            transaction.comment = Some(comment).filter(|c| !c.is_empty());
        }
        Ok(transaction.clone())
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.transactions.retain(|t| t.id != transaction_id);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeLocalState {
    pub categories: Vec<LocalCategory>,
    pub transactions: Vec<LocalTransaction>,
    pub migration_completed: bool,
    pub fail_reads: bool,
}

#[derive(Debug, Default)]
pub(crate) struct FakeLocalStore {
    pub state: Mutex<FakeLocalState>,
}

impl FakeLocalStore {
    pub fn new(categories: Vec<LocalCategory>, transactions: Vec<LocalTransaction>) -> Self {
        Self {
            state: Mutex::new(FakeLocalState {
                categories,
                transactions,
                ..Default::default()
            }),
        }
    }

    fn check_readable(state: &FakeLocalState) -> Result<()> {
        if state.fail_reads {
            return Err(Error::local_storage("corrupt snapshot"));
        }
        Ok(())
    }
}

impl LocalSnapshotStoreTrait for FakeLocalStore {
    fn read_local_transactions(&self) -> Result<Vec<LocalTransaction>> {
        let state = self.state.lock().unwrap();
        Self::check_readable(&state)?;
        Ok(state.transactions.clone())
    }

    fn read_local_categories(&self) -> Result<Vec<LocalCategory>> {
        let state = self.state.lock().unwrap();
        Self::check_readable(&state)?;
        Ok(state.categories.clone())
    }

    fn read_raw_transactions(&self) -> Result<Vec<serde_json::Value>> {
        let state = self.state.lock().unwrap();
        Self::check_readable(&state)?;
        state
            .transactions
            .iter()
            .map(|t| Ok(serde_json::to_value(t)?))
            .collect()
    }

    fn read_raw_categories(&self) -> Result<Vec<serde_json::Value>> {
        let state = self.state.lock().unwrap();
        Self::check_readable(&state)?;
        state
            .categories
            .iter()
            .map(|c| Ok(serde_json::to_value(c)?))
            .collect()
    }

    fn clear_local_snapshot(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.categories.clear();
        state.transactions.clear();
        Ok(())
    }

    fn is_migration_completed(&self) -> Result<bool> {
        Ok(self.state.lock().unwrap().migration_completed)
    }

    fn set_migration_completed(&self, completed: bool) -> Result<()> {
        self.state.lock().unwrap().migration_completed = completed;
        Ok(())
    }
}
