use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use tracing::{debug, info, info_span, trace};

use procstat_core::{HeaderRole, ReportSession, classify_headers};
use procstat_ingest::Source;
use procstat_model::{AggregateOptions, ColumnDiscovery, LoadState, NameMatching};

use crate::logging::redact_value;
use crate::render::{RenderOptions, Styling, render_report};
use crate::settings::{ReportFormat, Settings};

/// Report options after command-line parsing. `None` falls back to settings.
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    pub source: Option<Source>,
    pub format: Option<ReportFormat>,
    pub output: Option<PathBuf>,
    pub column_discovery: Option<ColumnDiscovery>,
    pub name_matching: Option<NameMatching>,
    pub year_column: Option<String>,
    pub compare: Vec<String>,
    pub bar_width: Option<usize>,
    pub styling: Styling,
}

impl ReportRequest {
    /// Aggregation options: request flags over settings over defaults.
    pub fn aggregate_options(&self, settings: &Settings) -> AggregateOptions {
        let mut options = settings.aggregation.clone();
        if let Some(discovery) = self.column_discovery {
            options = options.with_column_discovery(discovery);
        }
        if let Some(matching) = self.name_matching {
            options = options.with_name_matching(matching);
        }
        if let Some(year_column) = &self.year_column {
            options = options.with_year_column(year_column.clone());
        }
        options
    }

    pub fn resolve_source(&self, settings: &Settings) -> Source {
        self.source
            .clone()
            .unwrap_or_else(|| Source::parse(&settings.source.location))
    }

    pub fn resolve_format(&self, settings: &Settings) -> ReportFormat {
        self.format.unwrap_or(settings.display.format)
    }

    fn render_options(&self, settings: &Settings) -> RenderOptions {
        RenderOptions {
            bar_width: self.bar_width.unwrap_or(settings.display.bar_width),
            table_width: settings.display.table_width,
            compare: self.compare.clone(),
            styling: self.styling,
        }
    }
}

/// Terminal state of a report run plus its rendered output.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub state: LoadState,
    pub rendered: String,
}

impl ReportOutcome {
    pub fn exit_code(&self) -> i32 {
        match self.state {
            LoadState::Error { .. } => 1,
            _ => 0,
        }
    }
}

/// Loads, aggregates and renders without touching stdout or the filesystem
/// beyond reading the source.
pub fn build_report(request: &ReportRequest, settings: &Settings) -> Result<ReportOutcome> {
    let source = request.resolve_source(settings);
    let options = request.aggregate_options(settings);
    let format = request.resolve_format(settings);
    debug!(
        source = %source,
        ?format,
        column_discovery = ?options.column_discovery,
        name_matching = ?options.name_matching,
        year_column = %options.year_column,
        "report options"
    );

    let mut session = ReportSession::new(options);
    session.load(&source);

    if let Some(view) = session.state().view_model() {
        for total in &view.totals {
            trace!(procedure = redact_value(&total.name), total = total.value, "procedure total");
        }
    }

    let rendered = match format {
        ReportFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(session.state()).context("serialize report")?;
            json.push('\n');
            json
        }
        ReportFormat::Text => render_text(&session, &source, &request.render_options(settings)),
    };

    Ok(ReportOutcome {
        state: session.into_state(),
        rendered,
    })
}

fn render_text(session: &ReportSession, source: &Source, options: &RenderOptions) -> String {
    let source_label = source.to_string();
    match session.state() {
        LoadState::Ready(view) => render_report(
            view,
            session.aggregation().map(|aggregation| &aggregation.stats),
            &source_label,
            options,
        ),
        LoadState::Empty => format!("No procedure data found in {source_label}\n"),
        LoadState::Error { message } => format!("error: {message}\n"),
        LoadState::Loading => String::new(),
    }
}

/// Runs `procstat report`: builds the report and writes it to `--output` or stdout.
pub fn run_report(request: &ReportRequest, settings: &Settings) -> Result<ReportOutcome> {
    let span = info_span!("report");
    let _guard = span.enter();
    let outcome = build_report(request, settings)?;
    emit(&outcome.rendered, request.output.as_deref())?;
    info!(state = outcome.state.label(), "report finished");
    Ok(outcome)
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("write report: {}", path.display()))?;
            info!(path = %path.display(), "wrote report");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("write report to stdout")?;
            stdout.flush().context("flush stdout")?;
        }
    }
    Ok(())
}

/// Header listing with detected roles and non-empty cell counts.
pub fn columns_table(source: &Source, options: &AggregateOptions) -> Result<Table> {
    let table_data = source
        .load()
        .with_context(|| format!("load {source}"))?;
    let mut table = Table::new();
    table.set_header(vec!["Column", "Role", "Non-empty"]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    for (header, role) in classify_headers(&table_data.headers, options) {
        let filled = table_data
            .rows
            .iter()
            .filter(|row| row.get(header).is_some_and(|value| !value.trim().is_empty()))
            .count();
        let role_cell = match role {
            HeaderRole::Year => Cell::new(role.as_str()).fg(Color::Cyan),
            HeaderRole::Procedure => Cell::new(role.as_str()).fg(Color::Green),
            HeaderRole::Other => Cell::new(role.as_str()).fg(Color::DarkGrey),
        };
        table.add_row(vec![Cell::new(header), role_cell, Cell::new(filled)]);
    }
    Ok(table)
}

/// Runs `procstat columns`.
pub fn run_columns(source: &Source, options: &AggregateOptions) -> Result<()> {
    let table = columns_table(source, options)?;
    println!("{table}");
    Ok(())
}
