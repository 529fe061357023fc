use thiserror::Error;

use crate::types::CanonicalField;

/// Statement-level failures. Any of these aborts the whole parse; malformed
/// individual rows are reported as [`crate::SkipReason`] instead.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported bank '{0}' (known: hdfc, icici, axis, generic)")]
    UnsupportedBank(String),
    #[error("could not find a transaction header row in the statement")]
    HeaderNotFound,
    #[error("statement header has no {0} column")]
    MissingColumn(CanonicalField),
    #[error("no valid transactions found in statement ({skipped} rows skipped)")]
    NoTransactionsFound { skipped: usize },
    #[error("invalid date pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl IngestError {
    /// Short hint for the person who uploaded the file.
    pub fn hint(&self) -> &'static str {
        match self {
            IngestError::UnsupportedBank(_) => "check the bank selection",
            IngestError::HeaderNotFound | IngestError::MissingColumn(_) => {
                "check the file format"
            }
            IngestError::NoTransactionsFound { .. } => {
                "check the file format or try a different bank selection"
            }
            IngestError::Pattern(_) => "report this as a bug",
        }
    }
}
