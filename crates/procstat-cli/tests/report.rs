//! End-to-end report runs against on-disk CSV fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use procstat_cli::commands::{ReportRequest, build_report, columns_table, run_report};
use procstat_cli::render::Styling;
use procstat_cli::settings::{ReportFormat, Settings, load_settings};
use procstat_ingest::Source;
use procstat_model::{AggregateOptions, ColumnDiscovery, LoadState, NameMatching};

const EXAMPLE: &str = "\
AÑO,PROCEDIMENTO,PROCEDIMENTO 2,PACIENTE
2022,Biopsia,,Ana
2023,,Exame,Bia
2022, biopsia ,,Caio
2021,Biopsia,,Davi
";

fn write_csv(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("dados.csv");
    fs::write(&path, content).expect("write csv");
    path
}

fn request_for(path: PathBuf) -> ReportRequest {
    ReportRequest {
        source: Some(Source::Path(path)),
        styling: Styling::Never,
        ..ReportRequest::default()
    }
}

#[test]
fn text_report_has_all_sections() {
    let dir = tempfile::tempdir().expect("temp dir");
    let request = request_for(write_csv(dir.path(), EXAMPLE));

    let outcome = build_report(&request, &Settings::default()).expect("report");

    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(outcome.state.label(), "ready");
    let text = &outcome.rendered;
    assert!(text.contains("Total procedures: 3"));
    assert!(text.contains("Rows: 4 (1 outside 2022..2024)"));
    assert!(text.contains("Conteo de BIOPSIA por Año"));
    assert!(text.contains("Conteo de EXAME por Año"));
    assert!(text.contains("Total de Procedimentos"));
    assert!(text.contains("TOTAL"));
    assert!(!text.contains("Davi"));
}

#[test]
fn json_report_serializes_load_state() {
    let dir = tempfile::tempdir().expect("temp dir");
    let request = ReportRequest {
        format: Some(ReportFormat::Json),
        ..request_for(write_csv(dir.path(), EXAMPLE))
    };

    let outcome = build_report(&request, &Settings::default()).expect("report");
    let value: serde_json::Value = serde_json::from_str(&outcome.rendered).expect("json");

    assert_eq!(value["state"], "ready");
    assert_eq!(value["data"]["grandTotal"], 3);
    assert_eq!(value["data"]["totals"][0]["name"], "BIOPSIA");
    assert_eq!(value["data"]["totals"][0]["value"], 2);
    assert_eq!(
        value["data"]["perProcedureSeries"]["EXAME"][1]["conteo"],
        1
    );
}

#[test]
fn missing_source_exits_with_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let request = request_for(dir.path().join("missing.csv"));

    let outcome = build_report(&request, &Settings::default()).expect("report");

    assert_eq!(outcome.exit_code(), 1);
    assert!(matches!(outcome.state, LoadState::Error { .. }));
    assert!(outcome.rendered.starts_with("error: "));
}

#[test]
fn no_procedures_is_empty_report() {
    let dir = tempfile::tempdir().expect("temp dir");
    let request = request_for(write_csv(dir.path(), "AÑO,PACIENTE\n2022,Ana\n"));

    let outcome = build_report(&request, &Settings::default()).expect("report");

    assert_eq!(outcome.state, LoadState::Empty);
    assert_eq!(outcome.exit_code(), 0);
    assert!(outcome.rendered.contains("No procedure data found"));
}

#[test]
fn compare_keyword_adds_chart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let csv = "AÑO,PROCEDIMENTO\n2022,Papanicolau\n2023,Papanicolau Liquido\n2024,Exame\n";
    let request = ReportRequest {
        compare: vec!["papanicolau".to_string(), "raio".to_string()],
        ..request_for(write_csv(dir.path(), csv))
    };

    let outcome = build_report(&request, &Settings::default()).expect("report");

    assert!(outcome.rendered.contains("Comparison 'papanicolau'"));
    assert!(
        outcome
            .rendered
            .contains("Comparison 'raio': no matching procedures")
    );
}

#[test]
fn flags_override_settings() {
    let mut settings = Settings::default();
    settings.aggregation = AggregateOptions::default().with_name_matching(NameMatching::Raw);
    settings.display.format = ReportFormat::Json;

    let request = ReportRequest {
        column_discovery: Some(ColumnDiscovery::Single),
        year_column: Some("ANO".to_string()),
        format: Some(ReportFormat::Text),
        ..ReportRequest::default()
    };

    let options = request.aggregate_options(&settings);
    assert_eq!(options.column_discovery, ColumnDiscovery::Single);
    assert_eq!(options.name_matching, NameMatching::Raw);
    assert_eq!(options.year_column, "ANO");
    assert_eq!(request.resolve_format(&settings), ReportFormat::Text);
    assert_eq!(
        request.resolve_source(&settings),
        Source::parse("dados.csv")
    );
}

#[test]
fn settings_file_drives_report() {
    let dir = tempfile::tempdir().expect("temp dir");
    let csv_path = write_csv(dir.path(), EXAMPLE);
    let config_path = dir.path().join("procstat.toml");
    fs::write(
        &config_path,
        format!(
            "[source]\nlocation = {:?}\n\n[aggregation]\nname_matching = \"raw\"\n\n[display]\nformat = \"json\"\n",
            csv_path.display().to_string()
        ),
    )
    .expect("write settings");

    let settings = load_settings(&config_path).expect("settings");
    let outcome = build_report(&ReportRequest::default(), &settings).expect("report");
    let value: serde_json::Value = serde_json::from_str(&outcome.rendered).expect("json");

    // Raw matching keeps "Biopsia" and "biopsia" apart.
    assert_eq!(value["data"]["grandTotal"], 3);
    assert_eq!(
        value["data"]["totals"].as_array().map(Vec::len),
        Some(3)
    );
}

#[test]
fn report_written_to_output_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = dir.path().join("report.txt");
    let request = ReportRequest {
        output: Some(output.clone()),
        ..request_for(write_csv(dir.path(), EXAMPLE))
    };

    let outcome = run_report(&request, &Settings::default()).expect("report");

    let written = fs::read_to_string(&output).expect("read output");
    assert_eq!(written, outcome.rendered);
}

#[test]
fn columns_table_lists_roles() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = Source::Path(write_csv(dir.path(), EXAMPLE));

    let table = columns_table(&source, &AggregateOptions::default()).expect("columns");
    let text = table.to_string();

    assert!(text.contains("AÑO"));
    assert!(text.contains("year"));
    assert!(text.contains("procedure"));
    assert_eq!(table.row_iter().count(), 4);
}

#[test]
fn columns_table_reports_load_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = Source::Path(dir.path().join("missing.csv"));
    let err = columns_table(&source, &AggregateOptions::default()).unwrap_err();
    assert!(format!("{err:#}").contains("missing.csv"));
}
