//! One load cycle: fetch, parse, aggregate, shape.
//!
//! A [`ReportSession`] owns the only mutable state of a report run. Each call
//! to [`ReportSession::load`] starts a fresh cycle in
//! [`LoadState::Loading`] and ends in exactly one terminal state; results of
//! a previous cycle are dropped, never merged.

use std::time::Instant;

use tracing::{error, info, info_span};

use procstat_ingest::{ErrorKind, IngestError, Source};
use procstat_model::{AggregateOptions, AggregationResult, CsvTable, LoadState};

use crate::adapter::to_view_model;
use crate::aggregate::aggregate_table;

#[derive(Debug)]
pub struct ReportSession {
    options: AggregateOptions,
    state: LoadState,
    aggregation: Option<AggregationResult>,
    error_kind: Option<ErrorKind>,
}

impl ReportSession {
    pub fn new(options: AggregateOptions) -> Self {
        Self {
            options,
            state: LoadState::Loading,
            aggregation: None,
            error_kind: None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Aggregation behind the current state, once a load has succeeded.
    pub fn aggregation(&self) -> Option<&AggregationResult> {
        self.aggregation.as_ref()
    }

    /// Classification of the failure when the state is `Error`.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    /// Loads `source` and moves to a terminal state.
    pub fn load(&mut self, source: &Source) -> &LoadState {
        let span = info_span!("load", source = %source);
        let _guard = span.enter();
        self.load_with(|| source.load())
    }

    /// Runs a cycle with a custom loader in place of [`Source::load`].
    pub fn load_with<F>(&mut self, loader: F) -> &LoadState
    where
        F: FnOnce() -> Result<CsvTable, IngestError>,
    {
        self.state = LoadState::Loading;
        self.aggregation = None;
        self.error_kind = None;

        let start = Instant::now();
        match loader() {
            Err(err) => {
                error!(kind = ?err.kind(), error = %err, "load failed");
                self.error_kind = Some(err.kind());
                self.state = LoadState::failed(err.to_string());
            }
            Ok(table) => {
                let aggregation =
                    info_span!("aggregate").in_scope(|| aggregate_table(&table, &self.options));
                let view = to_view_model(&aggregation);
                self.state = LoadState::from_view_model(view);
                info!(
                    state = self.state.label(),
                    rows = aggregation.stats.rows_scanned,
                    procedures = aggregation.procedure_count(),
                    grand_total = aggregation.grand_total,
                    duration_ms = start.elapsed().as_millis(),
                    "load complete"
                );
                self.aggregation = Some(aggregation);
            }
        }
        &self.state
    }

    pub fn into_state(self) -> LoadState {
        self.state
    }
}

impl Default for ReportSession {
    fn default() -> Self {
        Self::new(AggregateOptions::default())
    }
}
