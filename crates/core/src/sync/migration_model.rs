use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::categories::CategoryKey;
use crate::transactions::TransactionType;

/// Steps of one migration attempt. A failure is terminal for the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationPhase {
    NotStarted,
    ReadingSnapshot,
    ReconcilingCategories,
    RemappingTransactions,
    Importing,
    Succeeded,
    Failed,
}

impl fmt::Display for MigrationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not_started",
            Self::ReadingSnapshot => "reading_snapshot",
            Self::ReconcilingCategories => "reconciling_categories",
            Self::RemappingTransactions => "remapping_transactions",
            Self::Importing => "importing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Fatal migration failures. Each one ends the attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrationError {
    #[error("Failed to read local data: {0}")]
    LocalSnapshot(String),

    /// The authoritative remote category list could not be retrieved.
    #[error("Failed to fetch cloud categories: {0}")]
    FetchFailure(String),

    #[error("Failed to create categories: {0}")]
    CategoryCreateFailure(String),

    /// Categories created earlier in the attempt stay committed.
    #[error("Failed to create transactions: {0}")]
    TransactionCreateFailure(String),
}

/// Non-fatal issue recorded while migrating. Each one stands for a local
/// transaction that was not imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum MigrationWarning {
    /// A local transaction whose category matched nothing. An empty
    /// `category_name` means the record carried no category at all.
    #[serde(rename_all = "camelCase")]
    UnresolvableCategoryReference {
        transaction_id: Option<String>,
        category_type: TransactionType,
        category_name: String,
    },

    /// A local transaction the remote store would reject (e.g. a negative amount).
    #[serde(rename_all = "camelCase")]
    InvalidTransaction {
        transaction_id: Option<String>,
        reason: String,
    },
}

impl MigrationWarning {
    pub fn unresolvable(transaction_id: Option<String>, key: &CategoryKey) -> Self {
        Self::UnresolvableCategoryReference {
            transaction_id,
            category_type: key.category_type,
            category_name: key.name.clone(),
        }
    }

    /// Transaction stored without any category reference.
    pub fn missing_category(transaction_id: Option<String>, category_type: TransactionType) -> Self {
        Self::UnresolvableCategoryReference {
            transaction_id,
            category_type,
            category_name: String::new(),
        }
    }

    pub fn invalid(transaction_id: Option<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTransaction {
            transaction_id,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MigrationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvableCategoryReference {
                transaction_id,
                category_type,
                category_name,
            } if category_name.is_empty() => write!(
                f,
                "Category missing for transaction {}: {}",
                transaction_id.as_deref().unwrap_or("<no id>"),
                category_type
            ),
            Self::UnresolvableCategoryReference {
                transaction_id,
                category_type,
                category_name,
            } => write!(
                f,
                "Category not found for transaction {}: {}:{}",
                transaction_id.as_deref().unwrap_or("<no id>"),
                category_type,
                category_name
            ),
            Self::InvalidTransaction {
                transaction_id,
                reason,
            } => write!(
                f,
                "Invalid transaction {}: {}",
                transaction_id.as_deref().unwrap_or("<no id>"),
                reason
            ),
        }
    }
}

/// Outcome of one migration attempt, reported to the caller. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResult {
    pub attempt_id: String,
    pub success: bool,
    /// Categories created remotely during this attempt, even on failure.
    pub categories_migrated: usize,
    pub transactions_migrated: usize,
    /// Local transactions dropped with a warning (unresolvable category or
    /// invalid values).
    pub transactions_skipped: usize,
    pub warnings: Vec<MigrationWarning>,
    /// Phase in which the attempt failed, if it did.
    pub failed_phase: Option<MigrationPhase>,
    pub error: Option<String>,
}

impl MigrationResult {
    pub fn succeeded(
        attempt_id: String,
        categories_migrated: usize,
        transactions_migrated: usize,
        warnings: Vec<MigrationWarning>,
    ) -> Self {
        Self {
            attempt_id,
            success: true,
            categories_migrated,
            transactions_migrated,
            transactions_skipped: warnings.len(),
            warnings,
            failed_phase: None,
            error: None,
        }
    }

    /// Failed attempts never report migrated transactions: the bulk import is
    /// the last step, so nothing was imported when anything failed.
    pub fn failed(
        attempt_id: String,
        phase: MigrationPhase,
        categories_migrated: usize,
        warnings: Vec<MigrationWarning>,
        error: &MigrationError,
    ) -> Self {
        Self {
            attempt_id,
            success: false,
            categories_migrated,
            transactions_migrated: 0,
            transactions_skipped: warnings.len(),
            warnings,
            failed_phase: Some(phase),
            error: Some(error.to_string()),
        }
    }
}
