//! Canonical transaction record produced by statement ingestion

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::Category;

/// Money flow from the account holder's perspective.
///
/// Some call sites speak of `income`/`expense` instead of `credit`/`debit`;
/// both spellings are accepted on input and normalized to `credit`/`debit`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "debit", alias = "expense")]
    Debit,
    #[serde(rename = "credit", alias = "income")]
    Credit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Debit => "debit",
            Direction::Credit => "credit",
        }
    }

    pub fn is_credit(&self) -> bool {
        matches!(self, Direction::Credit)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a direction label is neither debit/expense nor credit/income.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transaction direction '{0}'")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debit" | "expense" => Ok(Direction::Debit),
            "credit" | "income" => Ok(Direction::Credit),
            other => Err(UnknownDirection(other.to_string())),
        }
    }
}

/// A normalized statement line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Process-local identifier assigned at ingestion
    pub id: String,
    /// Value date of the transaction (serialized as YYYY-MM-DD)
    pub date: NaiveDate,
    /// Narration text as it appeared on the statement
    pub description: String,
    /// Magnitude only; never negative
    pub amount: Decimal,
    #[serde(alias = "type")]
    pub direction: Direction,
    /// Running balance stated by the source row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
    pub category: Category,
    /// Code of the adapter that produced this record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.direction == Direction::Debit
    }
}

/// Stable sort by date; rows sharing a date keep their statement order.
pub fn sort_chronologically(txns: &mut [Transaction]) {
    txns.sort_by_key(|t| t.date);
}
