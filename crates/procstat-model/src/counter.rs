use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::year::{YEAR_COUNT, YEAR_DOMAIN};

/// Per-procedure aggregate of total and per-year counts.
///
/// Every year of [`YEAR_DOMAIN`] has a slot from creation, so a year with no
/// occurrences reads as zero rather than absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureCounter {
    pub total: u64,
    /// Counts aligned with [`YEAR_DOMAIN`].
    pub by_year: [u64; YEAR_COUNT],
}

impl ProcedureCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence in the year at `year_index`.
    ///
    /// Indexes outside the year domain are ignored.
    pub fn record(&mut self, year_index: usize) {
        if let Some(slot) = self.by_year.get_mut(year_index) {
            *slot += 1;
            self.total += 1;
        }
    }

    /// Year labels paired with their counts, in domain order.
    pub fn years(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        YEAR_DOMAIN.iter().copied().zip(self.by_year.iter().copied())
    }
}

/// Bookkeeping gathered while scanning rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationStats {
    pub rows_scanned: usize,
    /// Rows with a missing or unrecognized year, skipped by the count pass.
    pub rows_outside_year_domain: usize,
    /// Procedure columns used, in header order.
    pub procedure_columns: Vec<String>,
    /// Resolved year column, if the headers contain one.
    pub year_column: Option<String>,
}

/// Output of the aggregator: one counter per distinct procedure name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Counters keyed by procedure name (sorted ascending).
    pub counters: BTreeMap<String, ProcedureCounter>,
    pub grand_total: u64,
    pub stats: AggregationStats,
}

impl AggregationResult {
    /// True when no procedure names were discovered.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub fn procedure_count(&self) -> usize {
        self.counters.len()
    }

    pub fn get(&self, procedure: &str) -> Option<&ProcedureCounter> {
        self.counters.get(procedure)
    }
}
