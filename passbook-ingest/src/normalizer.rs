//! Row → Transaction conversion.
//!
//! Bank exports are noisy (opening-balance lines, page footers, totals), so a
//! row that does not look like a transaction is skipped with a reason rather
//! than failing the statement.

use std::str::FromStr;

use passbook_core::{Category, Direction, Transaction};
use passbook_finance::RuleTable;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::adapters::DatePattern;
use crate::types::{ColumnMap, RowOutcome, SkipReason};

/// Byte offset where the number starts, skipping currency prefixes such as
/// `Rs.` or `INR `. A leading `.` counts only at a word start, so the dot in
/// `Rs.500` is not read as a decimal point.
fn number_start(raw: &str) -> Option<usize> {
    let chars: Vec<(usize, char)> = raw.char_indices().collect();
    let digit_at = |i: usize| chars.get(i).is_some_and(|(_, c)| c.is_ascii_digit());

    chars.iter().enumerate().find_map(|(i, &(offset, c))| {
        let word_start = i == 0 || chars[i - 1].1.is_whitespace() || chars[i - 1].1 == '-';
        let starts = c.is_ascii_digit()
            || (c == '-' && (digit_at(i + 1) || chars.get(i + 1).is_some_and(|(_, n)| *n == '.')))
            || (c == '.' && word_start && digit_at(i + 1));
        starts.then_some(offset)
    })
}

/// Strip currency prefixes, thousands separators and Dr/Cr suffixes, keeping
/// only digits, `.` and `-`. `None` when nothing parseable remains.
fn sanitize_decimal(raw: &str) -> Option<Decimal> {
    let start = number_start(raw)?;
    let cleaned: String = raw[start..]
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Parse a debit/credit cell. Empty or unparseable cells count as zero.
pub fn parse_amount(raw: &str) -> Decimal {
    sanitize_decimal(raw).unwrap_or(Decimal::ZERO)
}

fn clean_description(raw: &str) -> &str {
    raw.trim_start_matches('\u{feff}').trim().trim_matches('"').trim()
}

/// Turns statement rows into transactions for one resolved header layout.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    columns: ColumnMap,
    dates: &'a DatePattern,
    rules: &'a RuleTable,
    bank: &'static str,
}

impl<'a> Normalizer<'a> {
    pub fn new(
        columns: ColumnMap,
        dates: &'a DatePattern,
        rules: &'a RuleTable,
        bank: &'static str,
    ) -> Self {
        Self {
            columns,
            dates,
            rules,
            bank,
        }
    }

    fn cell<'r>(&self, fields: &'r [String], index: Option<usize>) -> &'r str {
        index
            .and_then(|i| fields.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn normalize(&self, fields: &[String]) -> RowOutcome {
        match self.try_normalize(fields) {
            Ok(txn) => RowOutcome::Parsed(txn),
            Err(reason) => RowOutcome::Skipped(reason),
        }
    }

    fn try_normalize(&self, fields: &[String]) -> Result<Transaction, SkipReason> {
        let cols = &self.columns;

        let expected = cols.required_width();
        if fields.len() < expected {
            return Err(SkipReason::TooFewFields {
                expected,
                found: fields.len(),
            });
        }

        let raw_date = self.cell(fields, Some(cols.date));
        if !self.dates.matches(raw_date) {
            return Err(SkipReason::DateMismatch {
                value: raw_date.to_string(),
            });
        }

        // A non-zero debit takes priority over the credit column
        let debit = parse_amount(self.cell(fields, cols.debit));
        let credit = parse_amount(self.cell(fields, cols.credit));
        let (direction, amount) = if !debit.is_zero() {
            (Direction::Debit, debit.abs())
        } else if !credit.is_zero() {
            (Direction::Credit, credit.abs())
        } else {
            return Err(SkipReason::ZeroAmount);
        };

        let description = clean_description(self.cell(fields, Some(cols.description)));
        if description.is_empty() {
            return Err(SkipReason::EmptyDescription);
        }

        let date = self.dates.to_date(raw_date)?;
        let balance = sanitize_decimal(self.cell(fields, cols.balance));

        let category = match direction {
            Direction::Credit => Category::Income,
            Direction::Debit => self.rules.categorize(description),
        };

        Ok(Transaction {
            id: Uuid::new_v4().to_string(),
            date,
            description: description.to_string(),
            amount,
            direction,
            balance,
            category,
            bank: Some(self.bank.to_string()),
        })
    }
}
