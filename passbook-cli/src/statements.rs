//! Load and parse statement files off the async runtime.

use anyhow::{Context, Result, anyhow};
use passbook_finance::RuleTable;
use passbook_ingest::{IngestError, ParseReport, StatementParser};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info};

#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub report: ParseReport,
}

fn parse_blocking(
    text: &str,
    bank: Option<&str>,
    rules: &RuleTable,
) -> Result<ParseReport, IngestError> {
    let parser = match bank {
        Some(code) => StatementParser::for_bank(code)?,
        None => StatementParser::sniff(text),
    };
    parser.with_rules(rules).parse_report(text)
}

async fn parse_one(
    path: PathBuf,
    bank: Option<String>,
    rules: Arc<RuleTable>,
    limit: Duration,
) -> Result<ParsedFile> {
    let text = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("read {}", path.display()))?;
    debug!(path = %path.display(), bytes = text.len(), "read statement");

    let task = tokio::task::spawn_blocking(move || parse_blocking(&text, bank.as_deref(), &rules));
    let report = tokio::time::timeout(limit, task)
        .await
        .map_err(|_| anyhow!("parsing {} timed out after {:?}", path.display(), limit))?
        .context("parse task panicked")?
        .map_err(|e| {
            let hint = e.hint();
            anyhow::Error::new(e).context(format!("parsing {} ({hint})", path.display()))
        })?;

    info!(
        path = %path.display(),
        bank = report.bank,
        parsed = report.transactions.len(),
        skipped = report.skipped.len(),
        "parsed statement file"
    );
    Ok(ParsedFile { path, report })
}

/// Parse every file concurrently. Results come back in argument order; the
/// first failure aborts the rest.
pub async fn parse_files(
    paths: &[PathBuf],
    bank: Option<&str>,
    rules: RuleTable,
    limit: Duration,
) -> Result<Vec<ParsedFile>> {
    let rules = Arc::new(rules);
    let mut set = JoinSet::new();
    for (i, path) in paths.iter().enumerate() {
        let fut = parse_one(
            path.clone(),
            bank.map(str::to_string),
            Arc::clone(&rules),
            limit,
        );
        set.spawn(async move { (i, fut.await) });
    }

    let mut slots: Vec<Option<ParsedFile>> = paths.iter().map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        let (i, parsed) = joined.context("statement task panicked")?;
        slots[i] = Some(parsed?);
    }
    Ok(slots.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Date,Narration,Debit,Credit,Balance
21/02/25,SALARY FEB 2025,,50000.00,82500.00
19/02/25,UPI-SWIGGY-SWIG123-OTHR,850.50,,32500.00
";

    fn write_temp(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_results_follow_argument_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_temp(&dir, "a.csv", SAMPLE);
        let b = write_temp(&dir, "b.csv", "Date,Narration,Debit,Credit\n01/03/25,ATM,100,\n");

        let parsed = parse_files(
            &[a.clone(), b.clone()],
            None,
            RuleTable::builtin().clone(),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].path, a);
        assert_eq!(parsed[0].report.transactions.len(), 2);
        assert_eq!(parsed[1].path, b);
        assert_eq!(parsed[1].report.transactions.len(), 1);
    }

    #[tokio::test]
    async fn test_error_names_file_and_hint() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_temp(&dir, "bad.csv", "hello,world\n");
        let err = parse_files(
            &[bad],
            Some("hdfc"),
            RuleTable::builtin().clone(),
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("bad.csv"), "{msg}");
        assert!(msg.contains("check the file format"), "{msg}");
    }

    #[tokio::test]
    async fn test_unknown_bank_hint() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "a.csv", SAMPLE);
        let err = parse_files(
            &[path],
            Some("sbi"),
            RuleTable::builtin().clone(),
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("unsupported bank 'sbi'"), "{msg}");
        assert!(msg.contains("check the bank selection"), "{msg}");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = parse_files(
            &[PathBuf::from("/definitely/not/here.csv")],
            None,
            RuleTable::builtin().clone(),
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        assert!(format!("{err:#}").contains("here.csv"));
    }
}
