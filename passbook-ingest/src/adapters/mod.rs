//! Per-bank statement layouts.
//!
//! An adapter is pure configuration: the header names each bank uses for the
//! canonical columns and the shape of its dates. The resolver and normalizer
//! are shared by every bank.

mod axis;
mod generic;
mod hdfc;
mod icici;

pub use axis::AXIS;
pub use generic::GENERIC;
pub use hdfc::HDFC;
pub use icici::ICICI;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::resolver::normalize_header;
use crate::types::SkipReason;

/// Header-name candidates per canonical column, in priority order.
///
/// Candidates are compared against header cells that have been lower-cased and
/// stripped of non-alphanumerics, so `"Withdrawal Amt."` is seen as `withdrawalamt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnCandidates {
    pub date: &'static [&'static str],
    pub description: &'static [&'static str],
    pub debit: &'static [&'static str],
    pub credit: &'static [&'static str],
    pub balance: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearDigits {
    Two,
    Four,
    Either,
}

/// Day-month-year date layout with a single separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateLayout {
    pub separator: char,
    pub year: YearDigits,
}

impl DateLayout {
    /// Human-readable form, e.g. `DD/MM/YY(YY)`.
    pub fn describe(&self) -> String {
        let year = match self.year {
            YearDigits::Two => "YY",
            YearDigits::Four => "YYYY",
            YearDigits::Either => "YY(YY)",
        };
        format!("DD{sep}MM{sep}{year}", sep = self.separator)
    }

    pub fn compile(&self) -> Result<DatePattern, regex::Error> {
        let year = match self.year {
            YearDigits::Two => r"\d{2}",
            YearDigits::Four => r"\d{4}",
            YearDigits::Either => r"\d{4}|\d{2}",
        };
        let sep = regex::escape(&self.separator.to_string());
        // A trailing time component ("21/02/2025 10:42") is tolerated and ignored
        let re = Regex::new(&format!(
            r"^(\d{{1,2}}){sep}(\d{{1,2}}){sep}({year})(?:\s.*)?$"
        ))?;
        Ok(DatePattern { re })
    }
}

/// Compiled matcher for one [`DateLayout`].
#[derive(Debug, Clone)]
pub struct DatePattern {
    re: Regex,
}

impl DatePattern {
    pub fn matches(&self, value: &str) -> bool {
        self.re.is_match(value.trim())
    }

    /// Convert a statement date to a calendar date.
    ///
    /// Two-digit years are read as 20YY, so statements from before 2000 come out
    /// a century late.
    pub fn to_date(&self, value: &str) -> Result<NaiveDate, SkipReason> {
        let value = value.trim();
        let caps = self.re.captures(value).ok_or_else(|| SkipReason::DateMismatch {
            value: value.to_string(),
        })?;
        let invalid = || SkipReason::InvalidDate {
            value: value.to_string(),
        };

        let day: u32 = caps[1].parse().map_err(|_| invalid())?;
        let month: u32 = caps[2].parse().map_err(|_| invalid())?;
        let year_part = &caps[3];
        let mut year: i32 = year_part.parse().map_err(|_| invalid())?;
        if year_part.len() == 2 {
            year += 2000;
        }

        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
    }
}

/// Static description of one bank's CSV export.
#[derive(Debug, PartialEq, Eq)]
pub struct BankAdapter {
    /// Code callers select the adapter with (`hdfc`, `icici`, ...)
    pub code: &'static str,
    pub name: &'static str,
    pub columns: ColumnCandidates,
    /// Extra header words that mark an amount-bearing column during header search
    pub amount_hints: &'static [&'static str],
    /// Normalized header fragments that together identify this bank's export.
    /// Empty for the generic adapter, which is never sniffed.
    pub signature: &'static [&'static str],
    pub date_layout: DateLayout,
}

impl BankAdapter {
    /// True when every signature fragment appears in one of the header cells.
    pub fn matches_signature(&self, header: &[String]) -> bool {
        if self.signature.is_empty() {
            return false;
        }
        let normalized: Vec<String> = header.iter().map(|h| normalize_header(h)).collect();
        self.signature
            .iter()
            .all(|sig| normalized.iter().any(|h| h.contains(sig)))
    }
}

static ADAPTERS: [&BankAdapter; 4] = [&HDFC, &ICICI, &AXIS, &GENERIC];

/// Every registered adapter; bank-specific ones first, generic last.
pub fn all() -> &'static [&'static BankAdapter] {
    &ADAPTERS
}

/// Look up an adapter by its code (case-insensitive).
pub fn by_code(code: &str) -> Option<&'static BankAdapter> {
    let code = code.trim();
    ADAPTERS
        .iter()
        .copied()
        .find(|a| a.code.eq_ignore_ascii_case(code))
}

/// Pick the adapter whose header signature appears in the statement, falling
/// back to the generic layout.
pub fn sniff(rows: &[Vec<String>]) -> &'static BankAdapter {
    for (i, row) in rows.iter().enumerate() {
        if let Some(adapter) = ADAPTERS.iter().copied().find(|a| a.matches_signature(row)) {
            debug!(bank = adapter.code, row = i, "matched bank signature");
            return adapter;
        }
    }
    &GENERIC
}
