use std::fmt;

use passbook_core::Transaction;
use serde::{Deserialize, Serialize};

/// Normalized transaction attributes every adapter must locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalField {
    Date,
    Description,
    Debit,
    Credit,
    Balance,
    /// Either debit or credit; reported when neither column exists
    Amount,
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CanonicalField::Date => "date",
            CanonicalField::Description => "description",
            CanonicalField::Debit => "debit",
            CanonicalField::Credit => "credit",
            CanonicalField::Balance => "balance",
            CanonicalField::Amount => "debit/credit",
        };
        f.write_str(name)
    }
}

/// Column positions of canonical fields within a statement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnMap {
    pub date: usize,
    pub description: usize,
    pub debit: Option<usize>,
    pub credit: Option<usize>,
    pub balance: Option<usize>,
}

impl ColumnMap {
    /// Minimum number of fields a row needs to carry every resolved column.
    ///
    /// Balance is optional per row and does not count.
    pub fn required_width(&self) -> usize {
        [Some(self.date), Some(self.description), self.debit, self.credit]
            .into_iter()
            .flatten()
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// Where the header sits and where transaction rows begin (0-based row indices).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderLocation {
    pub header_row: usize,
    pub body_start: usize,
    pub columns: ColumnMap,
}

/// Why a statement row was not turned into a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    TooFewFields { expected: usize, found: usize },
    DateMismatch { value: String },
    InvalidDate { value: String },
    ZeroAmount,
    EmptyDescription,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooFewFields { expected, found } => {
                write!(f, "row has {found} fields, expected at least {expected}")
            }
            SkipReason::DateMismatch { value } => {
                write!(f, "'{value}' does not look like a statement date")
            }
            SkipReason::InvalidDate { value } => write!(f, "'{value}' is not a calendar date"),
            SkipReason::ZeroAmount => f.write_str("no debit or credit amount"),
            SkipReason::EmptyDescription => f.write_str("empty narration"),
        }
    }
}

/// Result of normalizing one statement row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Parsed(Transaction),
    Skipped(SkipReason),
}

/// A skipped row and its position in the statement (0-based, blank lines excluded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub row: usize,
    #[serde(flatten)]
    pub reason: SkipReason,
}
