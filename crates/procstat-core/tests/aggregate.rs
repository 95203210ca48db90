//! Integration tests for procedure aggregation.

use procstat_core::{aggregate, to_view_model};
use procstat_model::{AggregateOptions, ColumnDiscovery, NameMatching, Row};

fn row(cells: &[(&str, &str)]) -> Row {
    cells.iter().copied().collect()
}

fn headers(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn example_rows() -> Vec<Row> {
    vec![
        row(&[("AÑO", "2022"), ("PROCEDIMENTO", "Biopsia")]),
        row(&[("AÑO", "2022"), ("PROCEDIMENTO", "biopsia")]),
        row(&[("AÑO", "2023"), ("PROCEDIMENTO", "Exame")]),
        row(&[("AÑO", "2025"), ("PROCEDIMENTO", "Exame")]),
    ]
}

#[test]
fn example_scenario_strict_policy() {
    let result = aggregate(
        &example_rows(),
        &headers(&["AÑO", "PROCEDIMENTO"]),
        &AggregateOptions::default(),
    );

    assert_eq!(result.procedure_count(), 2);
    let biopsia = result.get("BIOPSIA").expect("BIOPSIA counter");
    assert_eq!(biopsia.total, 2);
    assert_eq!(biopsia.by_year, [2, 0, 0]);
    let exame = result.get("EXAME").expect("EXAME counter");
    assert_eq!(exame.total, 1);
    assert_eq!(exame.by_year, [0, 1, 0]);
    assert_eq!(result.grand_total, 3);
    assert_eq!(result.stats.rows_scanned, 4);
    assert_eq!(result.stats.rows_outside_year_domain, 1);
}

#[test]
fn case_and_whitespace_variants_share_one_counter() {
    let rows = vec![
        row(&[("AÑO", "2022"), ("PROCEDIMENTO", "Biopsia")]),
        row(&[("AÑO", "2023"), ("PROCEDIMENTO", " BIOPSIA ")]),
        row(&[("AÑO", "2024"), ("PROCEDIMENTO", "biopsia ")]),
    ];
    let result = aggregate(
        &rows,
        &headers(&["AÑO", "PROCEDIMENTO"]),
        &AggregateOptions::default(),
    );

    assert_eq!(result.procedure_count(), 1);
    let counter = result.get("BIOPSIA").expect("BIOPSIA counter");
    assert_eq!(counter.total, 3);
    assert_eq!(counter.by_year, [1, 1, 1]);
}

#[test]
fn raw_matching_keeps_case_distinct() {
    let options = AggregateOptions::default().with_name_matching(NameMatching::Raw);
    let result = aggregate(
        &example_rows(),
        &headers(&["AÑO", "PROCEDIMENTO"]),
        &options,
    );

    let names: Vec<&str> = result.counters.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Biopsia", "Exame", "biopsia"]);
    assert_eq!(result.grand_total, 3);
}

#[test]
fn empty_rows_give_empty_result() {
    let result = aggregate(
        &[],
        &headers(&["AÑO", "PROCEDIMENTO"]),
        &AggregateOptions::default(),
    );
    assert!(result.is_empty());
    assert_eq!(result.grand_total, 0);

    let view = to_view_model(&result);
    assert!(view.is_empty());
    assert_eq!(view.grand_total, 0);
}

#[test]
fn no_procedure_columns_give_empty_result() {
    let rows = vec![row(&[("AÑO", "2022"), ("PACIENTE", "Ana")])];
    let result = aggregate(
        &rows,
        &headers(&["AÑO", "PACIENTE"]),
        &AggregateOptions::default(),
    );
    assert!(result.is_empty());
    assert!(result.stats.procedure_columns.is_empty());
}

#[test]
fn whitespace_only_cells_are_ignored() {
    let rows = vec![
        row(&[("AÑO", "2022"), ("PROCEDIMENTO", "   ")]),
        row(&[("AÑO", "2022"), ("PROCEDIMENTO", "")]),
    ];
    let result = aggregate(
        &rows,
        &headers(&["AÑO", "PROCEDIMENTO"]),
        &AggregateOptions::default(),
    );
    assert!(result.is_empty());
}

#[test]
fn row_without_year_cell_is_skipped() {
    let rows = vec![
        row(&[("PROCEDIMENTO", "Exame")]),
        row(&[("AÑO", "2024"), ("PROCEDIMENTO", "Exame")]),
    ];
    let result = aggregate(
        &rows,
        &headers(&["AÑO", "PROCEDIMENTO"]),
        &AggregateOptions::default(),
    );
    assert_eq!(result.get("EXAME").map(|c| c.by_year), Some([0, 0, 1]));
    assert_eq!(result.stats.rows_outside_year_domain, 1);
}

#[test]
fn year_cells_are_trimmed() {
    let rows = vec![row(&[("AÑO", " 2023 "), ("PROCEDIMENTO", "Exame")])];
    let result = aggregate(
        &rows,
        &headers(&["AÑO", "PROCEDIMENTO"]),
        &AggregateOptions::default(),
    );
    assert_eq!(result.grand_total, 1);
}

#[test]
fn multi_column_scans_every_procedim_header() {
    let rows = vec![row(&[
        ("AÑO", "2023"),
        ("PROCEDIMENTO", "Exame"),
        ("PROCEDIMIENTO SECUNDARIO", "Biopsia"),
    ])];
    let headers = headers(&["AÑO", "PROCEDIMENTO", "PROCEDIMIENTO SECUNDARIO"]);

    let multi = aggregate(&rows, &headers, &AggregateOptions::default());
    assert_eq!(multi.procedure_count(), 2);
    assert_eq!(multi.grand_total, 2);

    let single = aggregate(
        &rows,
        &headers,
        &AggregateOptions::default().with_column_discovery(ColumnDiscovery::Single),
    );
    assert_eq!(single.procedure_count(), 1);
    assert!(single.get("EXAME").is_some());
    assert_eq!(single.stats.procedure_columns, vec!["PROCEDIMENTO"]);
}

#[test]
fn single_column_counts_every_procedimento_header() {
    let rows = vec![row(&[
        ("AÑO", "2022"),
        ("PROCEDIMENTO 1", "Biopsia"),
        ("PROCEDIMENTO 2", "Exame"),
    ])];
    let headers = headers(&["AÑO", "PROCEDIMENTO 1", "PROCEDIMENTO 2"]);
    let options = AggregateOptions::default()
        .with_column_discovery(ColumnDiscovery::Single)
        .with_name_matching(NameMatching::Raw);

    let result = aggregate(&rows, &headers, &options);

    assert_eq!(
        result.stats.procedure_columns,
        vec!["PROCEDIMENTO 1", "PROCEDIMENTO 2"]
    );
    assert_eq!(result.grand_total, 2);
    assert_eq!(
        result.counters.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Biopsia", "Exame"]
    );
}

#[test]
fn custom_year_column() {
    let rows = vec![row(&[("ANO", "2022"), ("PROCEDIMENTO", "Exame")])];
    let options = AggregateOptions::default().with_year_column("ano");
    let result = aggregate(&rows, &headers(&["ANO", "PROCEDIMENTO"]), &options);
    assert_eq!(result.stats.year_column.as_deref(), Some("ANO"));
    assert_eq!(result.grand_total, 1);
}

#[test]
fn view_model_ordering_and_shape() {
    let result = aggregate(
        &example_rows(),
        &headers(&["AÑO", "PROCEDIMENTO"]),
        &AggregateOptions::default(),
    );
    let view = to_view_model(&result);

    let names: Vec<&str> = view.totals.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["BIOPSIA", "EXAME"]);
    let series_names: Vec<&str> = view
        .per_procedure_series
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(series_names, names);

    let exame = view.series("EXAME").expect("EXAME series");
    let years: Vec<(&str, u64)> = exame.iter().map(|p| (p.name.as_str(), p.conteo)).collect();
    assert_eq!(years, vec![("2022", 0), ("2023", 1), ("2024", 0)]);
    assert_eq!(view.grand_total, 3);
}
