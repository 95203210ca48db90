//! Per-procedure, per-year counting over parsed CSV rows.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use procstat_model::{
    AggregateOptions, AggregationResult, AggregationStats, CsvTable, ProcedureCounter, Row,
    year_index,
};

use crate::columns::{find_year_column, procedure_columns};
use crate::normalize::normalize_name;

/// Aggregates a parsed table. See [`aggregate`].
pub fn aggregate_table(table: &CsvTable, options: &AggregateOptions) -> AggregationResult {
    aggregate(&table.rows, &table.headers, options)
}

/// Counts procedure occurrences per year and in total.
///
/// The scan runs in two passes. The first collects every procedure name from
/// every row, so each name gets a zero-filled counter even when none of its
/// rows fall inside the year domain. The second counts only rows whose year
/// cell is in the year domain; other rows contribute to no count, including
/// the grand total.
///
/// Never fails: unknown columns, blank cells and unrecognized years only
/// shrink the result.
pub fn aggregate(rows: &[Row], headers: &[String], options: &AggregateOptions) -> AggregationResult {
    let columns = procedure_columns(headers, options.column_discovery);
    let year_column = find_year_column(headers, &options.year_column);
    if columns.is_empty() {
        info!(
            marker = options.column_discovery.marker(),
            "no procedure columns found"
        );
    }
    if year_column.is_none() {
        info!(year_column = %options.year_column, "year column not found");
    }

    let names = discover_names(rows, &columns, options);
    let mut counters: BTreeMap<String, ProcedureCounter> = names
        .into_iter()
        .map(|name| (name, ProcedureCounter::new()))
        .collect();

    let mut grand_total = 0u64;
    let mut rows_outside_year_domain = 0usize;
    for row in rows {
        let Some(year) = year_column
            .and_then(|column| row.get(column))
            .and_then(year_index)
        else {
            rows_outside_year_domain += 1;
            continue;
        };
        for column in &columns {
            let Some(name) = row
                .get(column)
                .and_then(|value| normalize_name(value, options.name_matching))
            else {
                continue;
            };
            if let Some(counter) = counters.get_mut(&name) {
                counter.record(year);
                grand_total += 1;
            }
        }
    }

    let stats = AggregationStats {
        rows_scanned: rows.len(),
        rows_outside_year_domain,
        procedure_columns: columns.iter().map(|column| (*column).to_string()).collect(),
        year_column: year_column.map(str::to_string),
    };
    debug!(
        rows = stats.rows_scanned,
        skipped = stats.rows_outside_year_domain,
        procedures = counters.len(),
        grand_total,
        "aggregation complete"
    );

    AggregationResult {
        counters,
        grand_total,
        stats,
    }
}

fn discover_names(rows: &[Row], columns: &[&str], options: &AggregateOptions) -> BTreeSet<String> {
    rows.iter()
        .flat_map(|row| columns.iter().filter_map(move |column| row.get(column)))
        .filter_map(|value| normalize_name(value, options.name_matching))
        .collect()
}
