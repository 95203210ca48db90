//! Data model for procedure reports.
//!
//! The types in this crate flow through the whole pipeline:
//!
//! - [`CsvTable`] and [`Row`]: parsed CSV content as produced by ingestion
//! - [`AggregateOptions`]: strategy selection for the aggregator
//! - [`ProcedureCounter`] and [`AggregationResult`]: per-procedure counts
//! - [`ViewModel`]: render-ready shapes consumed by charts and tables
//! - [`LoadState`]: the observable state of one load cycle

pub mod counter;
pub mod options;
pub mod row;
pub mod state;
pub mod view;
pub mod year;

pub use counter::{AggregationResult, AggregationStats, ProcedureCounter};
pub use options::{
    AggregateOptions, ColumnDiscovery, DEFAULT_YEAR_COLUMN, NameMatching, PRIMARY_PROCEDURE_MARKER,
    PROCEDURE_MARKER,
};
pub use row::{CsvTable, Row};
pub use state::LoadState;
pub use view::{TotalPoint, ViewModel, YearPoint};
pub use year::{YEAR_COUNT, YEAR_DOMAIN, year_index};
