//! Where a report's CSV comes from.

use std::convert::Infallible;
use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use procstat_model::CsvTable;

use crate::error::{IngestError, Result};
use crate::reader::{MAX_CSV_FILE_SIZE, parse_csv_bytes, read_csv_table};

/// Conventional input file name.
pub const DEFAULT_SOURCE: &str = "dados.csv";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A CSV resource: a local file or an HTTP(S) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    /// Values starting with `http://` or `https://` are URLs; anything else is
    /// a filesystem path.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    /// Fetches and parses the resource.
    pub fn load(&self) -> Result<CsvTable> {
        match self {
            Self::Path(path) => {
                info!(path = %path.display(), "reading CSV file");
                read_csv_table(path)
            }
            Self::Url(url) => {
                let bytes = fetch_url(url)?;
                parse_csv_bytes(url, &bytes)
            }
        }
    }
}

impl Default for Source {
    fn default() -> Self {
        Self::Path(PathBuf::from(DEFAULT_SOURCE))
    }
}

impl FromStr for Source {
    type Err = Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(value))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

fn fetch_url(url: &str) -> Result<Vec<u8>> {
    info!(url, "fetching CSV");
    let network = |err: reqwest::Error| IngestError::Network {
        url: url.to_string(),
        message: err.to_string(),
    };
    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(network)?;
    let response = client.get(url).send().map_err(network)?;
    let status = response.status();
    if !status.is_success() {
        return Err(IngestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    check_content_length(url, response.content_length(), MAX_CSV_FILE_SIZE)?;
    let bytes = read_body_with_limit(url, response, MAX_CSV_FILE_SIZE)?;
    debug!(url, bytes = bytes.len(), "fetched CSV");
    Ok(bytes)
}

/// Rejects a response whose declared length exceeds `max_size`.
fn check_content_length(url: &str, length: Option<u64>, max_size: u64) -> Result<()> {
    match length {
        Some(size) if size > max_size => Err(IngestError::FileTooLarge {
            origin: url.to_string(),
            size,
            max_size,
        }),
        _ => Ok(()),
    }
}

/// Reads at most `max_size` bytes; a longer body is an error even when the
/// server sent no length.
fn read_body_with_limit<R: Read>(url: &str, body: R, max_size: u64) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    body.take(max_size.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|err| IngestError::Network {
            url: url.to_string(),
            message: err.to_string(),
        })?;
    let size = bytes.len() as u64;
    if size > max_size {
        return Err(IngestError::FileTooLarge {
            origin: url.to_string(),
            size,
            max_size,
        });
    }
    Ok(bytes)
}
