//! passbook-ingest: bank statement CSV ingestion.
//!
//! Raw statement text goes through header discovery ([`resolver`]), row
//! normalization ([`normalizer`]) and keyword categorization, driven by a
//! per-bank [`adapters::BankAdapter`].

pub mod adapters;
pub mod error;
pub mod normalizer;
pub mod parser;
pub mod resolver;
pub mod types;

pub use adapters::BankAdapter;
pub use error::IngestError;
pub use parser::{parse_statement, parse_statement_auto, ParseReport, StatementParser};
pub use types::{CanonicalField, ColumnMap, HeaderLocation, RowOutcome, SkipReason, SkippedRow};
