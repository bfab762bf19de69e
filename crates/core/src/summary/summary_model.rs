use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// `YYYY-MM` key; lexical order is chronological order.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Inclusive date range with month granularity. Open ends are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateFilter {
    /// Builds a filter from `YYYY-MM` bounds. The end bound covers the whole
    /// month.
    pub fn months(start_month: Option<&str>, end_month: Option<&str>) -> Result<Self> {
        let start = start_month.map(parse_month).transpose()?;
        let end = end_month
            .map(|m| parse_month(m).map(last_day_of_month))
            .transpose()?;
        Ok(Self { start, end })
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

fn parse_month(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map_err(|_| Error::validation(format!("Invalid month '{}', expected YYYY-MM", value)))
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

/// Headline numbers of the overview dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_balance: Decimal,
    /// Mean of monthly expense totals over months up to the current one.
    pub avg_monthly_expenses: Decimal,
    pub transaction_count: usize,
}

/// Expense totals of one category, per month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub by_month: BTreeMap<String, Decimal>,
    /// Mean over past months in which the category had any spending.
    pub average: Decimal,
}

/// Category × month expense table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    /// Every month with at least one expense, sorted.
    pub months: Vec<String>,
    pub categories: BTreeMap<String, CategoryBreakdown>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_filter_covers_whole_end_month() {
        let filter = DateFilter::months(Some("2024-02"), Some("2024-02")).unwrap();
        assert_eq!(filter.start, Some(date(2024, 2, 1)));
        assert_eq!(filter.end, Some(date(2024, 2, 29)));
        assert!(filter.contains(date(2024, 2, 29)));
        assert!(!filter.contains(date(2024, 3, 1)));
        assert!(!filter.contains(date(2024, 1, 31)));
    }

    #[test]
    fn december_end_rolls_over_year() {
        let filter = DateFilter::months(None, Some("2024-12")).unwrap();
        assert_eq!(filter.end, Some(date(2024, 12, 31)));
        assert!(filter.contains(date(1999, 1, 1)));
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(DateFilter::months(Some("2024-13"), None).is_err());
        assert!(DateFilter::months(Some("march"), None).is_err());
        assert!(DateFilter::default().is_unbounded());
    }

    #[test]
    fn month_key_is_zero_padded() {
        assert_eq!(month_key(date(2025, 3, 9)), "2025-03");
    }
}
