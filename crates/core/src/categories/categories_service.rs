use std::sync::Arc;

use log::debug;

use crate::categories::{Category, CategoryUpdate, NewCategory};
use crate::errors::{Error, Result};
use crate::store::RemoteStoreTrait;
use crate::transactions::{normalize_optional_text, TransactionType};

/// Validated category operations against the hosted store.
pub struct CategoryService {
    remote: Arc<dyn RemoteStoreTrait>,
}

impl CategoryService {
    pub fn new(remote: Arc<dyn RemoteStoreTrait>) -> Self {
        Self { remote }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.remote.list_categories().await
    }

    /// Creates a custom category, refusing a name already used for the type.
    pub async fn create_category(&self, category: NewCategory) -> Result<Category> {
        category.validate()?;
        let category = NewCategory::custom(
            category.category_type,
            category.name.trim(),
            normalize_optional_text(category.description.as_deref()),
        );

        if self
            .remote
            .find_category(category.category_type, &category.name)
            .await?
            .is_some()
        {
            return Err(Error::validation(format!(
                "Category '{}' already exists",
                category.key()
            )));
        }

        debug!("Creating category {}", category.key());
        self.remote.create_category(category).await
    }

    pub async fn update_category(
        &self,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category> {
        if update.is_empty() {
            return Err(Error::validation("Nothing to update"));
        }
        update.validate()?;
        let update = CategoryUpdate {
            name: update.name.map(|n| n.trim().to_string()),
            description: update.description.map(|d| d.trim().to_string()),
        };
        self.remote.update_category(category_id, update).await
    }

    /// Deletes a custom category that no transaction references.
    pub async fn delete_category(&self, category_id: &str) -> Result<()> {
        let usage = self
            .remote
            .list_transactions()
            .await?
            .iter()
            .filter(|t| t.category_id.as_str() == category_id)
            .count();
        if usage > 0 {
            return Err(Error::validation(format!(
                "Category is used in {} transaction{}; reassign or delete them first",
                usage,
                if usage == 1 { "" } else { "s" }
            )));
        }

        debug!("Deleting category {}", category_id);
        self.remote.delete_category(category_id).await
    }

    pub async fn category_exists(&self, category_type: TransactionType, name: &str) -> Result<bool> {
        Ok(self
            .remote
            .find_category(category_type, name)
            .await?
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::RemoteCategoryRef;
    use crate::store::fakes::FakeRemoteStore;
    use crate::transactions::NewTransaction;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn create_category_trims_and_forces_custom() {
        let remote = Arc::new(FakeRemoteStore::default());
        let service = CategoryService::new(remote.clone());

        let created = service
            .create_category(NewCategory {
                category_type: TransactionType::Expense,
                name: "  Pets ".to_string(),
                description: Some("   ".to_string()),
                is_default: true,
            })
            .await
            .expect("create");

        assert_eq!(created.name, "Pets");
        assert_eq!(created.description, None);
        assert!(!created.is_default);
        assert!(service
            .category_exists(TransactionType::Expense, "Pets")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn duplicate_category_is_rejected() {
        let remote = Arc::new(FakeRemoteStore::default());
        let service = CategoryService::new(remote.clone());
        let pets = NewCategory::custom(TransactionType::Expense, "Pets", None);

        service.create_category(pets.clone()).await.expect("first");
        let err = service.create_category(pets).await.expect_err("duplicate");

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(remote.categories().len(), 1);
    }

    #[tokio::test]
    async fn category_in_use_cannot_be_deleted() {
        let remote = Arc::new(FakeRemoteStore::default());
        let service = CategoryService::new(remote.clone());
        let pets = service
            .create_category(NewCategory::custom(TransactionType::Expense, "Pets", None))
            .await
            .unwrap();
        remote
            .create_transaction(NewTransaction {
                transaction_type: TransactionType::Expense,
                amount: dec!(20),
                date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                category_id: RemoteCategoryRef::new(pets.id.clone()),
                comment: None,
            })
            .await
            .unwrap();

        let err = service.delete_category(&pets.id).await.expect_err("in use");

        assert!(err.to_string().contains("used in 1 transaction;"));
        assert_eq!(remote.categories().len(), 1);
    }

    #[tokio::test]
    async fn empty_update_is_rejected_before_remote_call() {
        let remote = Arc::new(FakeRemoteStore::default());
        let service = CategoryService::new(remote);

        let err = service
            .update_category("missing", CategoryUpdate::default())
            .await
            .expect_err("empty");

        assert!(matches!(err, Error::Validation(_)));
    }
}
