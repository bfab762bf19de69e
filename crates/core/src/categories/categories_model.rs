use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::transactions::TransactionType;

/// Category reference held by local records: the category *name*.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalCategoryRef(String);

impl LocalCategoryRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocalCategoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category reference held by remote records: the server-issued identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteCategoryRef(String);

impl RemoteCategoryRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteCategoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite identity of a category: names are only unique per type.
///
/// Names compare exactly, without case folding or trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryKey {
    pub category_type: TransactionType,
    pub name: String,
}

impl CategoryKey {
    pub fn new(category_type: TransactionType, name: impl Into<String>) -> Self {
        Self {
            category_type,
            name: name.into(),
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category_type, self.name)
    }
}

/// A category as stored by the hosted service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    pub name: String,
    pub description: Option<String>,
    pub is_default: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn key(&self) -> CategoryKey {
        CategoryKey::new(self.category_type, self.name.clone())
    }

    pub fn reference(&self) -> RemoteCategoryRef {
        RemoteCategoryRef::new(self.id.clone())
    }
}

/// Id, name and type of a category, as embedded in transaction rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
}

/// Payload for inserting a category remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    pub name: String,
    pub description: Option<String>,
    pub is_default: bool,
}

impl NewCategory {
    /// A user-created category. Only the service seeds default categories.
    pub fn custom(
        category_type: TransactionType,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            category_type,
            name: name.into(),
            description,
            is_default: false,
        }
    }

    pub fn key(&self) -> CategoryKey {
        CategoryKey::new(self.category_type, self.name.clone())
    }

    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }
}

/// Editable fields of a category. Type and default flag are immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CategoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        match self.name.as_deref() {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("Category name must not be blank"));
    }
    Ok(())
}
