use anyhow::{Context, Result};
use passbook_core::Transaction;
use passbook_finance::{Summary, format_compact};
use serde::Serialize;
use std::io::Write;

use crate::config::OutputFormat;

/// Flat CSV record; every column is always present so rows stay aligned.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    date: String,
    description: &'a str,
    direction: &'static str,
    amount: String,
    balance: String,
    category: &'a str,
    bank: &'a str,
    id: &'a str,
}

impl<'a> From<&'a Transaction> for CsvRow<'a> {
    fn from(t: &'a Transaction) -> Self {
        Self {
            date: t.date.format("%Y-%m-%d").to_string(),
            description: &t.description,
            direction: t.direction.as_str(),
            amount: t.amount.to_string(),
            balance: t.balance.map(|b| b.to_string()).unwrap_or_default(),
            category: t.category.label(),
            bank: t.bank.as_deref().unwrap_or(""),
            id: &t.id,
        }
    }
}

#[derive(Serialize)]
struct TransactionsDoc<'a> {
    transactions: &'a [Transaction],
}

pub fn write_transactions<W: Write>(out: W, txns: &[Transaction], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, txns),
        OutputFormat::Csv => write_csv(out, txns),
        OutputFormat::Table => write_table(out, txns),
    }
}

fn write_json<W: Write>(mut out: W, txns: &[Transaction]) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, &TransactionsDoc { transactions: txns })
        .context("serialize transactions")?;
    writeln!(out)?;
    Ok(())
}

fn write_csv<W: Write>(out: W, txns: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for t in txns {
        wtr.serialize(CsvRow::from(t)).context("write csv row")?;
    }
    wtr.flush()?;
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn write_table<W: Write>(mut out: W, txns: &[Transaction]) -> Result<()> {
    writeln!(
        out,
        "{:<10}  {:<6}  {:>12}  {:>12}  {:<18}  {}",
        "DATE", "TYPE", "AMOUNT", "BALANCE", "CATEGORY", "DESCRIPTION"
    )?;
    for t in txns {
        writeln!(
            out,
            "{:<10}  {:<6}  {:>12}  {:>12}  {:<18}  {}",
            t.date.format("%Y-%m-%d"),
            t.direction.as_str(),
            format!("{:.2}", t.amount),
            t.balance.map(|b| format!("{b:.2}")).unwrap_or_else(|| "-".to_string()),
            truncate(t.category.label(), 18),
            truncate(&t.description, 48)
        )?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(mut out: W, summary: &Summary, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut out, summary).context("serialize summary")?;
        writeln!(out)?;
        return Ok(());
    }

    match (summary.first_date, summary.last_date) {
        (Some(first), Some(last)) => writeln!(out, "# Summary {first} to {last}\n")?,
        _ => writeln!(out, "# Summary\n")?,
    }
    writeln!(out, "Transactions: {}", summary.transaction_count)?;
    writeln!(
        out,
        "Income:       {:>12.2}  ({})",
        summary.total_income,
        format_compact(summary.total_income)
    )?;
    writeln!(
        out,
        "Expense:      {:>12.2}  ({})",
        summary.total_expense,
        format_compact(summary.total_expense)
    )?;
    writeln!(out, "Net:          {:>12.2}", summary.net)?;

    if !summary.by_category.is_empty() {
        writeln!(out, "\n## Spending by category\n")?;
        for c in &summary.by_category {
            writeln!(
                out,
                "- {:<18} {:>12.2}  {:>5}%  count={}",
                c.category.label(),
                c.total,
                c.share,
                c.transaction_count
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use passbook_core::{Category, Direction};
    use rust_decimal::Decimal;

    fn txn(desc: &str, amount: i64, direction: Direction, balance: Option<i64>) -> Transaction {
        Transaction {
            id: "id-1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 2, 19).unwrap(),
            description: desc.to_string(),
            amount: Decimal::from(amount),
            direction,
            balance: balance.map(Decimal::from),
            category: if direction.is_credit() {
                Category::Income
            } else {
                Category::FoodAndDining
            },
            bank: Some("hdfc".to_string()),
        }
    }

    fn render(txns: &[Transaction], format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_transactions(&mut buf, txns, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_json_wraps_transactions() {
        let out = render(&[txn("SWIGGY", 850, Direction::Debit, None)], OutputFormat::Json);
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        let list = v["transactions"].as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["category"], "Food & Dining");
        assert!(list[0].get("balance").is_none());
    }

    #[test]
    fn test_csv_keeps_columns_aligned() {
        let out = render(
            &[
                txn("SWIGGY, BLR", 850, Direction::Debit, None),
                txn("SALARY", 50000, Direction::Credit, Some(82500)),
            ],
            OutputFormat::Csv,
        );
        let mut rdr = csv::Reader::from_reader(out.as_bytes());
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(&headers[0], "date");
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "SWIGGY, BLR");
        assert_eq!(&rows[0][4], "");
        assert_eq!(&rows[1][2], "credit");
        assert_eq!(&rows[1][4], "82500");
    }

    #[test]
    fn test_table_has_header_and_rows() {
        let out = render(&[txn("SWIGGY", 850, Direction::Debit, None)], OutputFormat::Table);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("DATE"));
        assert!(lines[1].contains("850.00"));
        assert!(lines[1].contains("Food & Dining"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
