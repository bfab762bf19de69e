//! Stored record shapes for the local snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use finance_tracker_core::categories::LocalCategoryRef;
use finance_tracker_core::sync::{LocalCategory, LocalTransaction};
use finance_tracker_core::transactions::TransactionType;

pub const TRANSACTIONS_KEY: &str = "finance-tracker-transactions";
pub const CATEGORIES_KEY: &str = "finance-tracker-categories";
pub const MIGRATION_COMPLETED_KEY: &str = "finance-tracker-migration-completed";

/// Ids were written as epoch-millis numbers by older builds and as strings later.
fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Transaction as stored locally. Unknown fields (`categoryName`,
/// `timestamp`) are ignored on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalTransactionDB {
    #[serde(
        default,
        deserialize_with = "optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub date: NaiveDate,
    /// Category name. Some legacy rows stored `null` or dropped it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl From<LocalTransactionDB> for LocalTransaction {
    fn from(db: LocalTransactionDB) -> Self {
        LocalTransaction {
            id: db.id,
            transaction_type: db.transaction_type,
            amount: db.amount,
            date: db.date,
            category: db.category.map(LocalCategoryRef::new),
            comment: db.comment,
        }
    }
}

impl From<&LocalTransaction> for LocalTransactionDB {
    fn from(transaction: &LocalTransaction) -> Self {
        LocalTransactionDB {
            id: transaction.id.clone(),
            transaction_type: transaction.transaction_type,
            amount: transaction.amount,
            date: transaction.date,
            category: transaction
                .category
                .as_ref()
                .map(|category| category.name().to_string()),
            comment: transaction.comment.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalCategoryDB {
    #[serde(
        default,
        deserialize_with = "optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

impl From<LocalCategoryDB> for LocalCategory {
    fn from(db: LocalCategoryDB) -> Self {
        LocalCategory {
            id: db.id,
            category_type: db.category_type,
            name: db.name,
            description: db.description,
        }
    }
}

impl From<&LocalCategory> for LocalCategoryDB {
    fn from(category: &LocalCategory) -> Self {
        LocalCategoryDB {
            id: category.id.clone(),
            category_type: category.category_type,
            name: category.name.clone(),
            description: category.description.clone(),
            is_default: false,
        }
    }
}
