//! CSV loading into header-keyed rows.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use procstat_model::{CsvTable, Row};

use crate::error::{IngestError, Result};
use crate::header::{dedupe_headers, normalize_header};

/// Maximum size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

const WIDE_DATASET_COLUMNS: usize = 500;

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::from_io(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            origin: path.display().to_string(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Returns the name of a UTF-16 encoding when `bytes` start with its BOM.
pub fn detect_utf16(bytes: &[u8]) -> Option<&'static str> {
    match bytes.get(0..2) {
        Some([0xFF, 0xFE]) => Some("UTF-16 LE"),
        Some([0xFE, 0xFF]) => Some("UTF-16 BE"),
        _ => None,
    }
}

/// Reads and parses a CSV file from disk.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    check_file_size(path)?;
    let bytes = std::fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    parse_csv_bytes(&path.display().to_string(), &bytes)
}

/// Parses CSV content. The first non-blank line is the header row; blank
/// lines are skipped; short rows are padded with empty cells.
///
/// `origin` names the resource in error messages.
pub fn parse_csv_bytes(origin: &str, bytes: &[u8]) -> Result<CsvTable> {
    if let Some(encoding) = detect_utf16(bytes) {
        return Err(IngestError::UnsupportedEncoding {
            origin: origin.to_string(),
            encoding,
        });
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut records = reader.records();

    let header_record = loop {
        match records.next() {
            None => {
                debug!(origin, "CSV has no header row");
                return Ok(CsvTable::default());
            }
            Some(record) => {
                let record = record.map_err(|err| csv_error(origin, &err))?;
                if !is_blank(&record) {
                    break record;
                }
            }
        }
    };

    let headers = dedupe_headers(header_record.iter().map(normalize_header).collect());
    if headers.len() > WIDE_DATASET_COLUMNS {
        warn!(
            origin,
            columns = headers.len(),
            "Dataset has more than 500 columns"
        );
    }

    let mut table = CsvTable::new(headers);
    let mut blank_rows = 0usize;
    let mut overflow_rows = 0usize;
    for record in records {
        let record = record.map_err(|err| csv_error(origin, &err))?;
        if is_blank(&record) {
            blank_rows += 1;
            continue;
        }
        if record.len() > table.headers.len() {
            overflow_rows += 1;
        }
        let row: Row = table
            .headers
            .iter()
            .enumerate()
            .map(|(idx, header)| (header.clone(), record.get(idx).unwrap_or("")))
            .collect();
        table.push_row(row);
    }

    if overflow_rows > 0 {
        warn!(
            origin,
            rows = overflow_rows,
            "rows have more cells than headers; extra cells ignored"
        );
    }
    debug!(
        origin,
        columns = table.headers.len(),
        rows = table.row_count(),
        blank_rows,
        "parsed CSV"
    );
    Ok(table)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|value| value.trim().is_empty())
}

fn csv_error(origin: &str, err: &csv::Error) -> IngestError {
    let message = match err.position() {
        Some(position) => format!("line {}: {err}", position.line()),
        None => err.to_string(),
    };
    IngestError::CsvParse {
        origin: origin.to_string(),
        message,
    }
}
