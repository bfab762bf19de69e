//! Matching local categories against the authoritative remote list.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::categories::{Category, CategoryKey, LocalCategoryRef, NewCategory, RemoteCategoryRef};
use crate::store::RemoteStoreTrait;
use crate::sync::{LocalCategory, MigrationError};
use crate::transactions::{normalize_optional_text, TransactionType};

/// `(type, name)` → remote identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMapping {
    entries: HashMap<CategoryKey, RemoteCategoryRef>,
}

impl CategoryMapping {
    pub fn from_remote(categories: &[Category]) -> Self {
        let mut mapping = Self::default();
        mapping.merge(categories);
        mapping
    }

    /// Adds every category under its key; a later category with the same key
    /// replaces an earlier one.
    pub fn merge(&mut self, categories: &[Category]) {
        for category in categories {
            self.entries.insert(category.key(), category.reference());
        }
    }


    /// Converts a name-keyed local reference into the remote identifier.
    pub fn resolve(
        &self,
        category_type: TransactionType,
        category: &LocalCategoryRef,
    ) -> Option<&RemoteCategoryRef> {
        self.entries
            .get(&CategoryKey::new(category_type, category.name()))
    }

    pub fn contains(&self, key: &CategoryKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// What reconciliation must create, computed before any remote write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPlan {
    pub mapping: CategoryMapping,
    pub to_create: Vec<NewCategory>,
    /// Local categories already present remotely (or repeated locally).
    pub skipped: usize,
}

impl CategoryPlan {
    /// Registers the rows returned by the bulk insert.
    pub fn merge_created(&mut self, created: &[Category]) {
        self.mapping.merge(created);
    }
}

/// Stages every local category whose key is absent remotely. Staged
/// categories are always custom (`is_default = false`).
pub fn plan_category_reconciliation(remote: &[Category], local: &[LocalCategory]) -> CategoryPlan {
    let mapping = CategoryMapping::from_remote(remote);
    let mut staged_keys = HashSet::new();
    let mut to_create = Vec::new();
    let mut skipped = 0;

    for category in local {
        let key = category.key();
        if mapping.contains(&key) || !staged_keys.insert(key) {
            skipped += 1;
            continue;
        }
        to_create.push(NewCategory::custom(
            category.category_type,
            category.name.clone(),
            normalize_optional_text(category.description.as_deref()),
        ));
    }

    CategoryPlan {
        mapping,
        to_create,
        skipped,
    }
}

/// Completed mapping plus the categories this reconciliation created.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReconciliation {
    pub mapping: CategoryMapping,
    pub created: Vec<Category>,
}

/// Fetches the remote categories, creates the missing local ones in a single
/// bulk insert and returns the completed mapping.
///
/// Creation is all-or-nothing for the attempt: a failed insert aborts it.
pub async fn reconcile_categories(
    remote: &dyn RemoteStoreTrait,
    local: &[LocalCategory],
) -> Result<CategoryReconciliation, MigrationError> {
    let remote_categories = remote
        .list_categories()
        .await
        .map_err(|e| MigrationError::FetchFailure(e.to_string()))?;

    let mut plan = plan_category_reconciliation(&remote_categories, local);
    debug!(
        "Category reconciliation: {} remote, {} to create, {} already present",
        remote_categories.len(),
        plan.to_create.len(),
        plan.skipped
    );

    if plan.to_create.is_empty() {
        return Ok(CategoryReconciliation {
            mapping: plan.mapping,
            created: Vec::new(),
        });
    }

    let created = remote
        .bulk_insert_categories(std::mem::take(&mut plan.to_create))
        .await
        .map_err(|e| MigrationError::CategoryCreateFailure(e.to_string()))?;
    plan.merge_created(&created);
    debug!(
        "Created {} categories; mapping now covers {} keys",
        created.len(),
        plan.mapping.len()
    );

    Ok(CategoryReconciliation {
        mapping: plan.mapping,
        created,
    })
}
