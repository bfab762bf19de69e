use log::warn;

use crate::errors::Error;
use crate::sync::{CategoryMapping, LocalTransaction, MigrationWarning};
use crate::transactions::{normalize_optional_text, NewTransaction};

/// Local transactions rewritten to remote category identifiers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemapOutcome {
    pub staged: Vec<NewTransaction>,
    /// One warning per dropped transaction.
    pub warnings: Vec<MigrationWarning>,
}

impl RemapOutcome {
    pub fn dropped(&self) -> usize {
        self.warnings.len()
    }
}

/// Resolves each transaction's category through `mapping`.
///
/// A transaction without a category, or whose `(type, category)` key is
/// missing, is dropped with a warning, as is one the remote store would
/// reject. A single bad record never blocks the rest of the history.
pub fn remap_transactions(local: &[LocalTransaction], mapping: &CategoryMapping) -> RemapOutcome {
    let mut outcome = RemapOutcome::default();

    for transaction in local {
        let resolved = transaction
            .category
            .as_ref()
            .and_then(|category| mapping.resolve(transaction.transaction_type, category));
        let Some(category_id) = resolved else {
            let warning = match transaction.category_key() {
                Some(key) => MigrationWarning::unresolvable(transaction.id.clone(), &key),
                None => MigrationWarning::missing_category(
                    transaction.id.clone(),
                    transaction.transaction_type,
                ),
            };
            warn!("{}", warning);
            outcome.warnings.push(warning);
            continue;
        };

        let staged = NewTransaction {
            transaction_type: transaction.transaction_type,
            amount: transaction.amount,
            date: transaction.date,
            category_id: category_id.clone(),
            comment: normalize_optional_text(transaction.comment.as_deref()),
        };
        if let Err(err) = staged.validate() {
            let reason = match err {
                Error::Validation(message) => message,
                other => other.to_string(),
            };
            let warning = MigrationWarning::invalid(transaction.id.clone(), reason);
            warn!("{}", warning);
            outcome.warnings.push(warning);
            continue;
        }

        outcome.staged.push(staged);
    }

    outcome
}
