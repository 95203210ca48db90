//! Procedure aggregation core.
//!
//! - [`aggregate`]: counts procedure occurrences per year and in total
//! - [`to_view_model`]: shapes counts into chart and table point arrays
//! - [`ReportSession`]: runs one load cycle and exposes its [`LoadState`]
//!
//! [`LoadState`]: procstat_model::LoadState

pub mod adapter;
pub mod aggregate;
pub mod columns;
pub mod normalize;
pub mod session;

pub use adapter::to_view_model;
pub use aggregate::{aggregate, aggregate_table};
pub use columns::{HeaderRole, classify_headers, find_year_column, procedure_columns};
pub use normalize::normalize_name;
pub use session::ReportSession;
