//! Header discovery and column mapping.
//!
//! Bank exports routinely prepend account metadata (holder name, statement
//! period, branch) before the real column header, and header wording differs
//! per bank and export version. The header is located by matching column
//! names first, then by looking for the first row that starts with a date.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::adapters::{BankAdapter, DatePattern};
use crate::error::IngestError;
use crate::types::{CanonicalField, ColumnMap, HeaderLocation};

const BOM: char = '\u{feff}';

/// Candidates this short are only trusted once the header row is known.
const MIN_SEARCH_LEN: usize = 3;

/// Lower-case a header cell and drop everything that is not `[a-z0-9]`.
pub fn normalize_header(cell: &str) -> String {
    cell.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn clean_cell(field: &str) -> String {
    field.trim_start_matches(BOM).trim().to_string()
}

/// Parse one physical line as a CSV record. A line the CSV reader rejects is
/// split on bare commas instead.
fn split_line(line: &str) -> Vec<String> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    match rdr.read_record(&mut record) {
        Ok(_) => record.iter().map(clean_cell).collect(),
        Err(err) => {
            debug!(%err, "unreadable CSV line; splitting on commas");
            line.split(',').map(clean_cell).collect()
        }
    }
}

/// Split raw statement text into trimmed, comma-separated rows.
///
/// A leading byte-order mark is removed and blank rows are dropped, so row
/// indices count only non-empty lines. Each line is its own record: a stray
/// quote can only damage the row it appears on.
pub fn split_rows(raw: &str) -> Vec<Vec<String>> {
    let text = raw.strip_prefix(BOM).unwrap_or(raw);

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(split_line)
        .filter(|row| row.iter().any(|f| !f.is_empty()))
        .collect()
}

fn contains_any(cells: &[String], candidates: &[&str]) -> bool {
    cells
        .iter()
        .any(|cell| candidates.iter().any(|c| cell.contains(c)))
}

/// Like [`contains_any`], but ignores abbreviations such as `dt` or `dr`
/// that turn up inside unrelated metadata words.
fn contains_distinctive(cells: &[String], candidates: &[&str]) -> bool {
    cells.iter().any(|cell| {
        candidates
            .iter()
            .filter(|c| c.len() > MIN_SEARCH_LEN)
            .any(|c| cell.contains(c))
    })
}

/// A header row names a date column, a narration column and at least one
/// amount-bearing column.
fn looks_like_header(row: &[String], adapter: &BankAdapter) -> bool {
    let cells: Vec<String> = row.iter().map(|c| normalize_header(c)).collect();
    let cols = &adapter.columns;

    contains_distinctive(&cells, cols.date)
        && contains_distinctive(&cells, cols.description)
        && (contains_distinctive(&cells, cols.debit)
            || contains_distinctive(&cells, cols.credit)
            || contains_any(&cells, adapter.amount_hints))
}

/// Index of the first header cell matching a candidate, trying candidates in
/// priority order and skipping cells already claimed by another field.
fn find_column(headers: &[String], candidates: &[&str], claimed: &[usize]) -> Option<usize> {
    candidates.iter().find_map(|candidate| {
        headers
            .iter()
            .enumerate()
            .find(|(i, h)| !claimed.contains(i) && h.contains(candidate))
            .map(|(i, _)| i)
    })
}

/// Map canonical fields onto the cells of a header row.
pub fn map_columns(header: &[String], adapter: &BankAdapter) -> Result<ColumnMap, IngestError> {
    let headers: Vec<String> = header.iter().map(|h| normalize_header(h)).collect();
    let cols = &adapter.columns;
    let mut claimed = Vec::with_capacity(5);

    let date = find_column(&headers, cols.date, &claimed)
        .ok_or(IngestError::MissingColumn(CanonicalField::Date))?;
    claimed.push(date);

    let description = find_column(&headers, cols.description, &claimed)
        .ok_or(IngestError::MissingColumn(CanonicalField::Description))?;
    claimed.push(description);

    let debit = find_column(&headers, cols.debit, &claimed);
    claimed.extend(debit);
    let credit = find_column(&headers, cols.credit, &claimed);
    claimed.extend(credit);

    if debit.is_none() && credit.is_none() {
        return Err(IngestError::MissingColumn(CanonicalField::Amount));
    }

    let balance = find_column(&headers, cols.balance, &claimed);

    let columns = ColumnMap {
        date,
        description,
        debit,
        credit,
        balance,
    };
    debug!(?columns, "mapped statement columns");
    Ok(columns)
}

/// Locate the header row and resolve column indices.
pub fn resolve(
    rows: &[Vec<String>],
    adapter: &BankAdapter,
    dates: &DatePattern,
) -> Result<HeaderLocation, IngestError> {
    let (header_row, body_start) = if let Some(i) =
        rows.iter().position(|row| looks_like_header(row, adapter))
    {
        info!(bank = adapter.code, row = i, "found transaction header");
        (i, i + 1)
    } else {
        // No recognizable column names: the row before the first dated row
        // is taken as the header.
        let first_dated = rows
            .iter()
            .position(|row| row.first().is_some_and(|cell| dates.matches(cell)))
            .filter(|&i| i > 0)
            .ok_or(IngestError::HeaderNotFound)?;
        info!(
            bank = adapter.code,
            row = first_dated,
            "no header match; inferred header from first dated row"
        );
        (first_dated - 1, first_dated)
    };

    let columns = map_columns(&rows[header_row], adapter)?;
    Ok(HeaderLocation {
        header_row,
        body_start,
        columns,
    })
}
