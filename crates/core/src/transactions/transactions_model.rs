use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::{CategorySummary, RemoteCategoryRef};
use crate::errors::{Error, Result};

/// Direction of a money movement. Categories are scoped by the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(Error::validation(format!(
                "Unknown transaction type '{}'",
                other
            ))),
        }
    }
}

/// A transaction as stored by the hosted service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: RemoteCategoryRef,
    pub comment: Option<String>,
    /// Category columns joined in by list/insert queries, when requested.
    pub category: Option<CategorySummary>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for inserting a transaction remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: RemoteCategoryRef,
    pub comment: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)?;
        if self.category_id.as_str().trim().is_empty() {
            return Err(Error::validation("Transaction category is required"));
        }
        Ok(())
    }
}

/// Partial update of a transaction. `None` fields are left untouched; a
/// `Some` comment that is blank clears the stored comment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub category_id: Option<RemoteCategoryRef>,
    pub comment: Option<String>,
}

impl TransactionUpdate {
    pub fn is_empty(&self) -> bool {
        self.transaction_type.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.category_id.is_none()
            && self.comment.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        Ok(())
    }
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::validation(format!(
            "Transaction amount must not be negative, got {}",
            amount
        )));
    }
    Ok(())
}

/// Normalizes an optional free-text field: blank input means "no value".
pub fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_transaction(amount: Decimal) -> NewTransaction {
        NewTransaction {
            transaction_type: TransactionType::Expense,
            amount,
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            category_id: RemoteCategoryRef::new("c1"),
            comment: None,
        }
    }

    #[test]
    fn transaction_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransactionType::Income).unwrap(),
            "\"income\""
        );
        assert_eq!(
            "expense".parse::<TransactionType>().unwrap(),
            TransactionType::Expense
        );
        assert!("Expense".parse::<TransactionType>().is_err());
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert!(new_transaction(dec!(-1.50)).validate().is_err());
        assert!(new_transaction(dec!(0)).validate().is_ok());
        assert!(new_transaction(dec!(12.30)).validate().is_ok());
    }

    #[test]
    fn blank_category_is_rejected() {
        let mut tx = new_transaction(dec!(5));
        tx.category_id = RemoteCategoryRef::new("  ");
        assert!(tx.validate().is_err());
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(TransactionUpdate::default().is_empty());
        let update = TransactionUpdate {
            comment: Some(String::new()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn optional_text_is_trimmed_and_blank_dropped() {
        assert_eq!(normalize_optional_text(Some("  lunch ")), Some("lunch".to_string()));
        assert_eq!(normalize_optional_text(Some("   ")), None);
        assert_eq!(normalize_optional_text(None), None);
    }
}
