//! Procedure report ingestion.
//!
//! Loads a CSV resource (local file or HTTP URL) and tokenizes it into a
//! [`CsvTable`](procstat_model::CsvTable): the normalized header list plus one
//! header-keyed row per non-blank data line.
//!
//! # Example
//!
//! ```ignore
//! use procstat_ingest::Source;
//!
//! let table = Source::parse("dados.csv").load()?;
//! println!("{} rows", table.row_count());
//! ```

mod error;
mod header;
mod reader;
mod source;

// === Error Types ===
pub use error::{ErrorKind, IngestError, Result};

// === CSV Reading ===
pub use header::{dedupe_headers, normalize_header};
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, detect_utf16,
    parse_csv_bytes, read_csv_table,
};

// === Sources ===
pub use source::{DEFAULT_SOURCE, Source};
