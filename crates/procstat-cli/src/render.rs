//! Terminal rendering of a procedure report.
//!
//! The text report has four sections: a header with the grand total, one
//! per-year bar chart per procedure, the total-per-procedure bar chart (plus
//! any comparison charts), and the detail table.

use std::fmt::Write as _;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use procstat_model::{AggregationStats, TotalPoint, ViewModel, YEAR_COUNT, YEAR_DOMAIN, YearPoint};

/// Palette cycled by the totals chart (#0088FE, #00C49F, #FFBB28, #FF8042,
/// #8884d8, #82ca9d, #ffc658).
pub const PALETTE: [(u8, u8, u8); 7] = [
    (0x00, 0x88, 0xFE),
    (0x00, 0xC4, 0x9F),
    (0xFF, 0xBB, 0x28),
    (0xFF, 0x80, 0x42),
    (0x88, 0x84, 0xD8),
    (0x82, 0xCA, 0x9D),
    (0xFF, 0xC6, 0x58),
];

/// Bar colour of the per-year charts (#60a5fa).
const YEAR_BAR: (u8, u8, u8) = (0x60, 0xA5, 0xFA);

const BAR_GLYPH: char = '█';

/// Whether tables emit ANSI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Styling {
    /// Style only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub bar_width: usize,
    pub table_width: u16,
    /// Keywords for extra comparison charts.
    pub compare: Vec<String>,
    pub styling: Styling,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bar_width: 40,
            table_width: 120,
            compare: Vec::new(),
            styling: Styling::Auto,
        }
    }
}

/// Renders the full text report for a ready view model.
pub fn render_report(
    view: &ViewModel,
    stats: Option<&AggregationStats>,
    source: &str,
    options: &RenderOptions,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Procedures by year");
    let _ = writeln!(out, "Source: {source}");
    if let Some(stats) = stats {
        let _ = writeln!(
            out,
            "Rows: {} ({} outside {}..{})",
            stats.rows_scanned,
            stats.rows_outside_year_domain,
            YEAR_DOMAIN[0],
            YEAR_DOMAIN[YEAR_DOMAIN.len() - 1]
        );
        if !stats.procedure_columns.is_empty() {
            let _ = writeln!(
                out,
                "Procedure columns: {}",
                stats.procedure_columns.join(", ")
            );
        }
    }
    let _ = writeln!(out, "Total procedures: {}", view.grand_total);

    for (name, series) in &view.per_procedure_series {
        let _ = writeln!(out);
        let _ = writeln!(out, "Conteo de {name} por Año");
        let _ = writeln!(out, "{}", year_chart(series, options));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Total de Procedimentos");
    let _ = writeln!(out, "{}", totals_chart(&view.totals, options));

    for keyword in &options.compare {
        let _ = writeln!(out);
        let compared = view.comparison(keyword);
        if compared.is_empty() {
            let _ = writeln!(out, "Comparison '{keyword}': no matching procedures");
            continue;
        }
        let _ = writeln!(out, "Comparison '{keyword}'");
        let _ = writeln!(out, "{}", totals_chart(&compared, options));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Detail");
    let _ = write!(out, "{}", detail_table(view, options));
    out
}

/// Per-year bar chart for one procedure.
pub fn year_chart(series: &[YearPoint], options: &RenderOptions) -> Table {
    let max = series.iter().map(|point| point.conteo).max().unwrap_or(0);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Año"),
        header_cell("Conteo"),
        header_cell(""),
    ]);
    apply_chart_style(&mut table, options);
    align_column(&mut table, 1, CellAlignment::Right);
    for point in series {
        table.add_row(vec![
            Cell::new(&point.name),
            count_cell(point.conteo),
            Cell::new(bar(point.conteo, max, options.bar_width)).fg(rgb(YEAR_BAR)),
        ]);
    }
    table
}

/// Bar chart of per-procedure totals; bar colours cycle through [`PALETTE`].
pub fn totals_chart(totals: &[TotalPoint], options: &RenderOptions) -> Table {
    let max = totals.iter().map(|point| point.value).max().unwrap_or(0);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Procedure"),
        header_cell("Total"),
        header_cell(""),
    ]);
    apply_chart_style(&mut table, options);
    align_column(&mut table, 1, CellAlignment::Right);
    for (index, point) in totals.iter().enumerate() {
        let color = rgb(PALETTE[index % PALETTE.len()]);
        table.add_row(vec![
            Cell::new(&point.name).fg(Color::Blue),
            count_cell(point.value),
            Cell::new(bar(point.value, max, options.bar_width)).fg(color),
        ]);
    }
    table
}

/// Procedure by year table with a TOTAL row.
pub fn detail_table(view: &ViewModel, options: &RenderOptions) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Procedure")];
    header.extend(YEAR_DOMAIN.iter().map(|year| header_cell(year)));
    header.push(header_cell("Total"));
    table.set_header(header);
    apply_detail_style(&mut table, options);
    for index in 1..=YEAR_DOMAIN.len() + 1 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut year_totals = [0u64; YEAR_COUNT];
    for total in &view.totals {
        let mut row = vec![
            Cell::new(&total.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
        ];
        let series = view.series(&total.name).unwrap_or_default();
        for (slot, point) in year_totals.iter_mut().zip(series) {
            *slot += point.conteo;
            row.push(count_cell(point.conteo));
        }
        row.push(Cell::new(total.value).add_attribute(Attribute::Bold));
        table.add_row(row);
    }

    let mut footer = vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ];
    footer.extend(
        year_totals
            .iter()
            .map(|count| Cell::new(count).add_attribute(Attribute::Bold)),
    );
    footer.push(
        Cell::new(view.grand_total)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    );
    table.add_row(footer);
    table
}

/// A bar of `width` glyphs for `max`, scaled linearly. Non-zero values always
/// get at least one glyph.
pub fn bar(value: u64, max: u64, width: usize) -> String {
    if value == 0 || max == 0 || width == 0 {
        return String::new();
    }
    let scaled = (u128::from(value) * width as u128).div_ceil(u128::from(max));
    let glyphs = usize::try_from(scaled).unwrap_or(width).clamp(1, width);
    std::iter::repeat_n(BAR_GLYPH, glyphs).collect()
}

fn apply_chart_style(table: &mut Table, options: &RenderOptions) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(options.table_width);
    apply_styling(table, options.styling);
}

fn apply_detail_style(table: &mut Table, options: &RenderOptions) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(options.table_width);
    apply_styling(table, options.styling);
}

fn apply_styling(table: &mut Table, styling: Styling) {
    match styling {
        Styling::Auto => {}
        Styling::Always => {
            table.enforce_styling();
        }
        Styling::Never => {
            table.force_no_tty();
        }
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: u64) -> Cell {
    if count == 0 {
        Cell::new(count).fg(Color::DarkGrey)
    } else {
        Cell::new(count)
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}
