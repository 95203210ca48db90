//! Report settings loaded from an optional TOML file.
//!
//! ```toml
//! [source]
//! location = "data/dados.csv"
//!
//! [aggregation]
//! column_discovery = "multi"   # or "single"
//! name_matching = "normalized" # or "raw"
//! year_column = "AÑO"
//!
//! [display]
//! format = "text"              # or "json"
//! bar_width = 40
//! table_width = 120
//! ```
//!
//! Missing sections and keys fall back to defaults. Command-line flags take
//! precedence over file values.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use procstat_ingest::DEFAULT_SOURCE;
use procstat_model::AggregateOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: SourceSettings,
    pub aggregation: AggregateOptions,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// File path or `http(s)://` URL of the CSV.
    pub location: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            location: DEFAULT_SOURCE.to_string(),
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Terminal charts and tables.
    #[default]
    Text,
    /// The load state and view model as JSON.
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub format: ReportFormat,
    /// Width of the longest bar, in characters.
    pub bar_width: usize,
    /// Maximum table width.
    pub table_width: u16,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            bar_width: 40,
            table_width: 120,
        }
    }
}

/// Reads settings from `path`.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read settings: {}", path.display()))?;
    let settings = toml::from_str(&content)
        .with_context(|| format!("parse settings: {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Settings from `path` when given, defaults otherwise.
pub fn resolve_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => load_settings(path),
        None => Ok(Settings::default()),
    }
}
