//! Aggregations over ingested transactions for dashboards and reports.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use passbook_core::{Category, Direction, Transaction};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
    pub transaction_count: usize,
    /// Share of all expenses, in percent with one decimal place
    pub share: Decimal,
}

/// Income and expense booked on a single day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// income - expense
    pub net: Decimal,
    pub transaction_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Debits grouped by category, largest total first
    pub by_category: Vec<CategoryTotal>,
    /// One entry per day that has transactions, oldest first
    pub daily: Vec<DailyTotal>,
}

impl Summary {
    pub fn from_transactions(txns: &[Transaction]) -> Self {
        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;
        let mut groups: HashMap<&Category, (Decimal, usize)> = HashMap::new();
        let mut days: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();

        for txn in txns {
            let day = days.entry(txn.date).or_default();
            match txn.direction {
                Direction::Credit => {
                    total_income = saturating_add(total_income, txn.amount);
                    day.0 = saturating_add(day.0, txn.amount);
                }
                Direction::Debit => {
                    total_expense = saturating_add(total_expense, txn.amount);
                    day.1 = saturating_add(day.1, txn.amount);
                    let entry = groups.entry(&txn.category).or_default();
                    entry.0 = saturating_add(entry.0, txn.amount);
                    entry.1 += 1;
                }
            }
        }

        let mut by_category: Vec<CategoryTotal> = groups
            .into_iter()
            .map(|(category, (total, count))| CategoryTotal {
                category: category.clone(),
                total,
                transaction_count: count,
                share: percentage(total, total_expense),
            })
            .collect();

        // Largest spend first; label breaks ties so output is deterministic
        by_category.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.label().cmp(b.category.label()))
        });

        let daily = days
            .into_iter()
            .map(|(date, (income, expense))| DailyTotal { date, income, expense })
            .collect::<Vec<_>>();

        Summary {
            total_income,
            total_expense,
            net: total_income - total_expense,
            transaction_count: txns.len(),
            first_date: daily.first().map(|d| d.date),
            last_date: daily.last().map(|d| d.date),
            by_category,
            daily,
        }
    }

    /// Restrict the summary input to an inclusive date range.
    pub fn for_range(txns: &[Transaction], start: NaiveDate, end: NaiveDate) -> Self {
        let in_range: Vec<Transaction> = txns
            .iter()
            .filter(|t| t.date >= start && t.date <= end)
            .cloned()
            .collect();
        Self::from_transactions(&in_range)
    }
}

/// Amounts are non-negative magnitudes, so sums clamp at `Decimal::MAX`.
fn saturating_add(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or(Decimal::MAX)
}

/// `value` as a percentage of `total`, one decimal place. Zero when `total` is zero.
pub fn percentage(value: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    value
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Abbreviate an amount with Indian units: K (thousand), L (lakh), Cr (crore).
pub fn format_compact(amount: Decimal) -> String {
    let crore = Decimal::from(10_000_000);
    let lakh = Decimal::from(100_000);
    let thousand = Decimal::from(1_000);

    let (scaled, suffix) = if amount >= crore {
        (amount / crore, " Cr")
    } else if amount >= lakh {
        (amount / lakh, " L")
    } else if amount >= thousand {
        (amount / thousand, " K")
    } else {
        return amount.normalize().to_string();
    };

    format!(
        "{:.2}{}",
        scaled.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        suffix
    )
}
