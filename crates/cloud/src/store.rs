use async_trait::async_trait;

use finance_tracker_core::categories::{Category, CategoryUpdate, NewCategory};
use finance_tracker_core::store::RemoteStoreTrait;
use finance_tracker_core::transactions::{
    NewTransaction, Transaction, TransactionType, TransactionUpdate,
};
use finance_tracker_core::Result;

use crate::client::CloudStoreClient;

#[async_trait]
impl RemoteStoreTrait for CloudStoreClient {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.fetch_categories().await?)
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.fetch_transactions().await?)
    }

    async fn bulk_insert_categories(&self, categories: Vec<NewCategory>) -> Result<Vec<Category>> {
        Ok(self.batch_create_categories(categories).await?)
    }

    async fn bulk_insert_transactions(
        &self,
        transactions: Vec<NewTransaction>,
    ) -> Result<Vec<Transaction>> {
        Ok(self.batch_create_transactions(transactions).await?)
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category> {
        Ok(CloudStoreClient::create_category(self, category).await?)
    }

    async fn update_category(&self, category_id: &str, update: CategoryUpdate) -> Result<Category> {
        Ok(CloudStoreClient::update_category(self, category_id, update).await?)
    }

    async fn delete_category(&self, category_id: &str) -> Result<()> {
        Ok(CloudStoreClient::delete_category(self, category_id).await?)
    }

    async fn find_category(
        &self,
        category_type: TransactionType,
        name: &str,
    ) -> Result<Option<Category>> {
        Ok(CloudStoreClient::find_category(self, category_type, name).await?)
    }

    async fn create_transaction(&self, transaction: NewTransaction) -> Result<Transaction> {
        Ok(CloudStoreClient::create_transaction(self, transaction).await?)
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        Ok(CloudStoreClient::update_transaction(self, transaction_id, update).await?)
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        Ok(CloudStoreClient::delete_transaction(self, transaction_id).await?)
    }
}
