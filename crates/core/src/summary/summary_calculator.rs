//! Aggregations behind the overview dashboard.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::categories::Category;
use crate::summary::{month_key, CategoryBreakdown, DateFilter, ExpenseBreakdown, SummaryStats};
use crate::transactions::{Transaction, TransactionType};

const UNCATEGORIZED: &str = "Uncategorized";

/// Transactions whose date falls inside `filter`.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &DateFilter,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|t| filter.contains(t.date))
        .collect()
}

/// Display name of a transaction's category: the joined row if present,
/// otherwise a lookup by identifier.
pub fn category_name<'a>(transaction: &'a Transaction, categories: &'a [Category]) -> &'a str {
    if let Some(summary) = &transaction.category {
        return &summary.name;
    }
    categories
        .iter()
        .find(|c| c.id == transaction.category_id.as_str())
        .map_or(UNCATEGORIZED, |c| c.name.as_str())
}

/// Sum of amounts per month.
pub fn monthly_totals<'a, I>(transactions: I) -> BTreeMap<String, Decimal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = BTreeMap::new();
    for transaction in transactions {
        *totals
            .entry(month_key(transaction.date))
            .or_insert(Decimal::ZERO) += transaction.amount;
    }
    totals
}

pub fn calculate_summary_stats(transactions: &[&Transaction], today: NaiveDate) -> SummaryStats {
    let mut stats = SummaryStats {
        transaction_count: transactions.len(),
        ..Default::default()
    };

    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::Income => stats.total_income += transaction.amount,
            TransactionType::Expense => stats.total_expenses += transaction.amount,
        }
    }
    stats.net_balance = stats.total_income - stats.total_expenses;

    let current_month = month_key(today);
    let past: Vec<Decimal> = monthly_totals(
        transactions
            .iter()
            .copied()
            .filter(|t| t.transaction_type == TransactionType::Expense),
    )
    .into_iter()
    .filter(|(month, _)| *month <= current_month)
    .map(|(_, total)| total)
    .collect();

    if !past.is_empty() {
        stats.avg_monthly_expenses = past.iter().sum::<Decimal>() / Decimal::from(past.len());
    }
    stats
}

/// Expense total per category name.
pub fn category_totals(
    transactions: &[&Transaction],
    categories: &[Category],
) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for transaction in expenses(transactions) {
        *totals
            .entry(category_name(transaction, categories).to_string())
            .or_insert(Decimal::ZERO) += transaction.amount;
    }
    totals
}

/// Expense totals per category and month, with per-category averages over
/// months up to `today` that had spending.
pub fn expense_breakdown(
    transactions: &[&Transaction],
    categories: &[Category],
    today: NaiveDate,
) -> ExpenseBreakdown {
    let mut months = BTreeSet::new();
    let mut table: BTreeMap<String, CategoryBreakdown> = BTreeMap::new();

    for transaction in expenses(transactions) {
        let month = month_key(transaction.date);
        months.insert(month.clone());
        *table
            .entry(category_name(transaction, categories).to_string())
            .or_default()
            .by_month
            .entry(month)
            .or_insert(Decimal::ZERO) += transaction.amount;
    }

    let current_month = month_key(today);
    for breakdown in table.values_mut() {
        let past: Vec<Decimal> = months
            .iter()
            .filter(|month| **month <= current_month)
            .filter_map(|month| breakdown.by_month.get(month).copied())
            .filter(|value| *value > Decimal::ZERO)
            .collect();
        if !past.is_empty() {
            breakdown.average = past.iter().sum::<Decimal>() / Decimal::from(past.len());
        }
    }

    ExpenseBreakdown {
        months: months.into_iter().collect(),
        categories: table,
    }
}

fn expenses<'a>(transactions: &'a [&'a Transaction]) -> impl Iterator<Item = &'a Transaction> {
    transactions
        .iter()
        .copied()
        .filter(|t| t.transaction_type == TransactionType::Expense)
}
