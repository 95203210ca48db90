//! Header classification: which column holds the year, which hold procedures.

use procstat_model::{AggregateOptions, ColumnDiscovery};

/// Role of a header in a procedure CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRole {
    Year,
    Procedure,
    Other,
}

impl HeaderRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Procedure => "procedure",
            Self::Other => "-",
        }
    }
}

/// True if `header`, upper-cased, contains `marker`.
pub fn header_matches(header: &str, marker: &str) -> bool {
    header.to_uppercase().contains(marker)
}

/// Procedure columns in header order.
///
/// Multi-column discovery keeps every header containing `PROCEDIM`;
/// single-column discovery keeps every header containing `PROCEDIMENTO`.
pub fn procedure_columns(headers: &[String], discovery: ColumnDiscovery) -> Vec<&str> {
    let marker = discovery.marker();
    headers
        .iter()
        .map(String::as_str)
        .filter(|header| header_matches(header, marker))
        .collect()
}

/// Resolves the year column: an exact case-insensitive match on `name` wins,
/// otherwise the first header containing it.
pub fn find_year_column<'a>(headers: &'a [String], name: &str) -> Option<&'a str> {
    let wanted = name.trim().to_uppercase();
    if wanted.is_empty() {
        return None;
    }
    headers
        .iter()
        .find(|header| header.trim().to_uppercase() == wanted)
        .or_else(|| headers.iter().find(|header| header_matches(header, &wanted)))
        .map(String::as_str)
}

/// Pairs every header with its role under `options`.
pub fn classify_headers<'a>(
    headers: &'a [String],
    options: &AggregateOptions,
) -> Vec<(&'a str, HeaderRole)> {
    let year = find_year_column(headers, &options.year_column);
    let procedures = procedure_columns(headers, options.column_discovery);
    headers
        .iter()
        .map(|header| {
            let header = header.as_str();
            let role = if year == Some(header) {
                HeaderRole::Year
            } else if procedures.contains(&header) {
                HeaderRole::Procedure
            } else {
                HeaderRole::Other
            };
            (header, role)
        })
        .collect()
}
