//! Statement parsing entry points.
//!
//! Parsing is synchronous and touches no shared mutable state: adapters are
//! statics and the rule table is only read, so several statements can be
//! parsed concurrently on different threads.

use passbook_core::Transaction;
use passbook_finance::RuleTable;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::adapters::{self, BankAdapter};
use crate::error::IngestError;
use crate::normalizer::Normalizer;
use crate::resolver::{resolve, split_rows};
use crate::types::{HeaderLocation, RowOutcome, SkippedRow};

/// Outcome of parsing one statement, including rows that were dropped.
#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    pub bank: &'static str,
    pub header: HeaderLocation,
    /// In file order, not date order
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<SkippedRow>,
}

/// Parses statements for one bank layout.
#[derive(Debug, Clone, Copy)]
pub struct StatementParser<'r> {
    adapter: &'static BankAdapter,
    rules: &'r RuleTable,
}

impl StatementParser<'static> {
    /// Parser for an explicit bank code. Fails before any parsing work when
    /// the code is unknown.
    pub fn for_bank(code: &str) -> Result<Self, IngestError> {
        let adapter =
            adapters::by_code(code).ok_or_else(|| IngestError::UnsupportedBank(code.to_string()))?;
        Ok(Self::new(adapter))
    }

    /// Parser whose adapter is picked from the statement's header signature.
    pub fn sniff(raw: &str) -> Self {
        let rows = split_rows(raw);
        let adapter = adapters::sniff(&rows);
        info!(bank = adapter.code, "sniffed statement format");
        Self::new(adapter)
    }

    pub fn new(adapter: &'static BankAdapter) -> Self {
        Self {
            adapter,
            rules: RuleTable::builtin(),
        }
    }
}

impl<'r> StatementParser<'r> {
    /// Use a different rule table, e.g. one extended with custom categories.
    pub fn with_rules<'n>(self, rules: &'n RuleTable) -> StatementParser<'n> {
        StatementParser {
            adapter: self.adapter,
            rules,
        }
    }

    pub fn adapter(&self) -> &'static BankAdapter {
        self.adapter
    }

    /// Parse statement text into transactions, in file order.
    pub fn parse(&self, raw: &str) -> Result<Vec<Transaction>, IngestError> {
        Ok(self.parse_report(raw)?.transactions)
    }

    /// Parse and keep per-row diagnostics for rows that were not transactions.
    pub fn parse_report(&self, raw: &str) -> Result<ParseReport, IngestError> {
        let rows = split_rows(raw);
        let dates = self.adapter.date_layout.compile()?;
        let header = resolve(&rows, self.adapter, &dates)?;
        let normalizer = Normalizer::new(header.columns, &dates, self.rules, self.adapter.code);

        let mut transactions = Vec::new();
        let mut skipped = Vec::new();

        for (row, fields) in rows.iter().enumerate().skip(header.body_start) {
            match normalizer.normalize(fields) {
                RowOutcome::Parsed(txn) => transactions.push(txn),
                RowOutcome::Skipped(reason) => {
                    debug!(row, %reason, "skipping statement row");
                    skipped.push(SkippedRow { row, reason });
                }
            }
        }

        if transactions.is_empty() {
            warn!(
                bank = self.adapter.code,
                skipped = skipped.len(),
                "no transactions survived normalization"
            );
            return Err(IngestError::NoTransactionsFound {
                skipped: skipped.len(),
            });
        }

        info!(
            bank = self.adapter.code,
            parsed = transactions.len(),
            skipped = skipped.len(),
            "parsed statement"
        );

        Ok(ParseReport {
            bank: self.adapter.code,
            header,
            transactions,
            skipped,
        })
    }
}

/// Parse a statement with the adapter registered for `bank_code`.
pub fn parse_statement(raw: &str, bank_code: &str) -> Result<Vec<Transaction>, IngestError> {
    StatementParser::for_bank(bank_code)?.parse(raw)
}

/// Parse a statement, detecting the bank from its header.
pub fn parse_statement_auto(raw: &str) -> Result<Vec<Transaction>, IngestError> {
    StatementParser::sniff(raw).parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SkipReason;
    use passbook_core::{Category, Direction};

    const HDFC_SAMPLE: &str = "\
HDFC BANK Ltd.
Statement From : 01/02/2025 To : 28/02/2025
Date,Narration,Chq./Ref.No.,Value Dt,Withdrawal Amt.,Deposit Amt.,Closing Balance
19/02/25,UPI-SWIGGY-SWIG123-OTHR,0000123,19/02/25,850.50,,32500.00
20/02/25,NEFT CR-ACME CORP,0000124,20/02/25,,1200.00,33700.00
21/02/25,SALARY FEB 2025,0000125,21/02/25,,\"50,000.00\",\"83,700.00\"
Statement Summary,,,,,,
";

    #[test]
    fn test_unsupported_bank_fails_first() {
        let err = parse_statement("not even a statement", "sbi").unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedBank(code) if code == "sbi"));
    }

    #[test]
    fn test_report_keeps_file_order_and_skips() {
        let report = StatementParser::for_bank("hdfc")
            .unwrap()
            .parse_report(HDFC_SAMPLE)
            .unwrap();
        assert_eq!(report.bank, "hdfc");
        assert_eq!(report.header.header_row, 2);
        assert_eq!(report.transactions.len(), 3);
        let descs: Vec<_> = report.transactions.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(
            descs,
            vec!["UPI-SWIGGY-SWIG123-OTHR", "NEFT CR-ACME CORP", "SALARY FEB 2025"]
        );
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].row, 6);
        assert!(matches!(report.skipped[0].reason, SkipReason::DateMismatch { .. }));
    }

    #[test]
    fn test_quoted_amounts() {
        let txns = parse_statement(HDFC_SAMPLE, "HDFC").unwrap();
        let salary = &txns[2];
        assert_eq!(salary.direction, Direction::Credit);
        assert_eq!(salary.amount, rust_decimal::Decimal::from(50_000));
        assert_eq!(salary.balance, Some(rust_decimal::Decimal::from(83_700)));
    }

    #[test]
    fn test_sniffed_parse_matches_explicit() {
        let parser = StatementParser::sniff(HDFC_SAMPLE);
        assert_eq!(parser.adapter().code, "hdfc");
        let auto = parse_statement_auto(HDFC_SAMPLE).unwrap();
        assert_eq!(auto.len(), 3);
    }

    #[test]
    fn test_no_transactions_found() {
        let text = "Date,Narration,Debit,Credit,Balance\n21/02/25,NOTHING,,,100\nTotal,,,,\n";
        let err = parse_statement(text, "generic").unwrap_err();
        assert!(matches!(err, IngestError::NoTransactionsFound { skipped: 2 }));
    }

    #[test]
    fn test_custom_rules() {
        let rules = RuleTable::builtin().with_custom_categories(["Pets"]);
        let text = "Date,Narration,Debit,Credit\n01/03/25,SUPERTAILS PETS CARE,499,\n";
        let txns = StatementParser::for_bank("generic")
            .unwrap()
            .with_rules(&rules)
            .parse(text)
            .unwrap();
        assert_eq!(txns[0].category, Category::Custom("Pets".to_string()));
    }
}
