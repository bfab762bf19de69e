//! Row shapes exchanged with the REST API.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use finance_tracker_core::categories::{
    Category, CategorySummary, NewCategory, RemoteCategoryRef,
};
use finance_tracker_core::transactions::{NewTransaction, Transaction, TransactionType};

/// PostgREST error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub message: String,
    pub code: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl ApiErrorResponse {
    pub fn describe(&self) -> String {
        let mut text = match &self.code {
            Some(code) => format!("{}: {}", code, self.message),
            None => self.message.clone(),
        };
        if let Some(details) = self.details.as_deref().filter(|d| !d.is_empty()) {
            text.push_str(&format!(" ({})", details));
        }
        text
    }
}

/// Identifier columns may be uuid text or bigint depending on the schema.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRow {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            category_type: row.category_type,
            name: row.name,
            description: row.description,
            is_default: row.is_default,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryJoinRow {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRow {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(deserialize_with = "string_or_number")]
    pub category_id: String,
    pub comment: Option<String>,
    pub category: Option<CategoryJoinRow>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Transaction {
            id: row.id,
            transaction_type: row.transaction_type,
            amount: row.amount,
            date: row.date,
            category_id: RemoteCategoryRef::new(row.category_id),
            comment: row.comment,
            category: row.category.map(|c| CategorySummary {
                id: c.id,
                name: c.name,
                category_type: c.category_type,
            }),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCategoryRow {
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    pub name: String,
    pub description: Option<String>,
    pub is_default: bool,
}

impl From<NewCategory> for NewCategoryRow {
    fn from(category: NewCategory) -> Self {
        NewCategoryRow {
            category_type: category.category_type,
            name: category.name,
            description: category.description,
            is_default: category.is_default,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTransactionRow {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: String,
    pub comment: Option<String>,
}

impl From<NewTransaction> for NewTransactionRow {
    fn from(transaction: NewTransaction) -> Self {
        NewTransactionRow {
            transaction_type: transaction.transaction_type,
            amount: transaction.amount,
            date: transaction.date,
            category_id: transaction.category_id.as_str().to_string(),
            comment: transaction.comment,
        }
    }
}
