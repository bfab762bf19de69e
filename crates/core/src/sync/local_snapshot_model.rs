//! Records read from the local snapshot and the values built from them.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::{Category, CategoryKey, LocalCategoryRef};
use crate::errors::Result;
use crate::transactions::{Transaction, TransactionType};

/// A category created locally before the user had a remote account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalCategory {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    pub name: String,
    pub description: Option<String>,
}

impl LocalCategory {
    pub fn key(&self) -> CategoryKey {
        CategoryKey::new(self.category_type, self.name.clone())
    }
}

/// A transaction recorded locally; its category is referenced by name.
/// Older records may have lost the reference altogether.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalTransaction {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub category: Option<LocalCategoryRef>,
    pub comment: Option<String>,
}

impl LocalTransaction {
    /// The key this transaction's category must resolve through, if it has one.
    pub fn category_key(&self) -> Option<CategoryKey> {
        self.category
            .as_ref()
            .map(|category| CategoryKey::new(self.transaction_type, category.name()))
    }
}

/// Whether any local data exists, and how much.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalDataSummary {
    pub has_data: bool,
    pub transaction_count: usize,
    pub category_count: usize,
}

impl LocalDataSummary {
    pub fn new(transaction_count: usize, category_count: usize) -> Self {
        Self {
            has_data: transaction_count > 0 || category_count > 0,
            transaction_count,
            category_count,
        }
    }
}

/// Both remote collections, fetched together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudData {
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
}

/// Copy of the raw local records taken before a migration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalBackup {
    pub transactions: Vec<serde_json::Value>,
    pub categories: Vec<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl LocalBackup {
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Suggested download name, unique per millisecond.
    pub fn file_name(&self) -> String {
        format!(
            "finance-tracker-backup-{}.json",
            self.timestamp.timestamp_millis()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn summary_reports_data_when_either_collection_is_non_empty() {
        assert!(!LocalDataSummary::new(0, 0).has_data);
        assert!(LocalDataSummary::new(0, 1).has_data);
        assert!(LocalDataSummary::new(3, 0).has_data);
    }

    #[test]
    fn backup_serializes_with_rfc3339_timestamp() {
        let backup = LocalBackup {
            transactions: vec![json!({"id": 1, "amount": 12.5})],
            categories: vec![],
            timestamp: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        };

        let encoded = backup.to_pretty_json().unwrap();
        assert!(encoded.contains("\"timestamp\": \"2025-01-02T03:04:05Z\""));
        assert!(encoded.contains('\n'));
        assert_eq!(backup.file_name(), "finance-tracker-backup-1735787045000.json");
    }
}
