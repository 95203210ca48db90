//! Configuration options for procedure aggregation.

use serde::{Deserialize, Serialize};

/// Header substring that marks a procedure column under multi-column discovery.
pub const PROCEDURE_MARKER: &str = "PROCEDIM";

/// Header substring recognized by single-column discovery.
pub const PRIMARY_PROCEDURE_MARKER: &str = "PROCEDIMENTO";

/// Default header of the year column.
pub const DEFAULT_YEAR_COLUMN: &str = "AÑO";

/// Which headers count as procedure columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnDiscovery {
    /// Every header containing [`PRIMARY_PROCEDURE_MARKER`].
    Single,
    /// Every header containing [`PROCEDURE_MARKER`].
    #[default]
    Multi,
}

impl ColumnDiscovery {
    pub fn marker(self) -> &'static str {
        match self {
            Self::Single => PRIMARY_PROCEDURE_MARKER,
            Self::Multi => PROCEDURE_MARKER,
        }
    }
}

/// How procedure cell values are turned into grouping keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameMatching {
    /// Trim only; "Biopsia" and "BIOPSIA" stay distinct.
    Raw,
    /// Trim and upper-case; matching is case-insensitive.
    #[default]
    Normalized,
}

/// Options controlling how rows are aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateOptions {
    pub column_discovery: ColumnDiscovery,
    pub name_matching: NameMatching,
    /// Header of the column holding the year label.
    pub year_column: String,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            column_discovery: ColumnDiscovery::default(),
            name_matching: NameMatching::default(),
            year_column: DEFAULT_YEAR_COLUMN.to_string(),
        }
    }
}

impl AggregateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_column_discovery(mut self, discovery: ColumnDiscovery) -> Self {
        self.column_discovery = discovery;
        self
    }

    #[must_use]
    pub fn with_name_matching(mut self, matching: NameMatching) -> Self {
        self.name_matching = matching;
        self
    }

    #[must_use]
    pub fn with_year_column(mut self, column: impl Into<String>) -> Self {
        self.year_column = column.into();
        self
    }
}
