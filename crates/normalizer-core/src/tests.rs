use std::fs;
use std::path::PathBuf;

use crate::errors::NormalizeError;
use crate::io::{read_table_from, write_table_to};
use crate::model::{Cell, Table};
use crate::pipeline::{run_stages, Pipeline, Stage};
use crate::stages::schema::REQUIRED_COLUMNS;
use crate::stages::{DurationsStage, TotalDurationStage, ZipStage};
use crate::PipelineConfig;

fn fixture(path: &str) -> Vec<u8> {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

#[test]
fn sample_file_normalizes_to_expected_output() {
    let table = read_table_from(fixture("sample.csv").as_slice())
        .expect("sample should parse");
    let report = Pipeline::default()
        .run(&table)
        .expect("pipeline should succeed");

    let mut written = Vec::new();
    write_table_to(&mut written, &report.table).expect("write");
    assert_eq!(
        String::from_utf8(written).expect("utf8 output"),
        String::from_utf8(fixture("sample_expected.csv")).expect("utf8 fixture")
    );

    let summary: Vec<(&str, usize)> = report.warnings.iter().map(|w| (w.stage, w.row)).collect();
    assert_eq!(
        summary,
        vec![("ZIP", 2), ("Durations", 3), ("TotalDuration", 3)]
    );
}

#[test]
fn missing_column_aborts_and_names_stage() {
    let table = Table::from_strings([
        vec![
            "Timestamp",
            "ZIP",
            "FullName",
            "Address",
            "FooDuration",
            "BarDuration",
            "Notes",
        ],
        vec![
            "3/10/24 2:30:00 PM",
            "1",
            "a b",
            "x",
            "0:00:01",
            "0:00:02",
            "n",
        ],
    ]);
    let err = Pipeline::default()
        .run(&table)
        .expect_err("TotalDuration is missing");
    match &err {
        NormalizeError::MissingColumn { stage, columns } => {
            assert_eq!(*stage, "TotalDuration");
            assert_eq!(columns, &vec!["TotalDuration"]);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().contains("TotalDuration stage"));
}

#[test]
fn empty_table_passes_through_every_stage() {
    let report = Pipeline::default()
        .run(&Table::default())
        .expect("empty input is not an error");
    assert!(report.table.is_empty());
    assert!(report.warnings.is_empty());
}

#[test]
fn header_only_table_still_checks_columns() {
    let table = Table::from_strings([vec!["Timestamp"]]);
    assert!(Pipeline::default().run(&table).is_err());
}

#[test]
fn total_depends_on_durations_running_first() {
    let table = Table::from_strings([
        vec!["FooDuration", "BarDuration", "TotalDuration"],
        vec!["0:00:10", "0:00:05.5", ""],
    ]);

    let ordered: [&dyn Stage; 2] = [&DurationsStage, &TotalDurationStage];
    let report = run_stages(&table, &ordered).expect("ordered run");
    assert_eq!(report.table.cell(0, 2), Some(&Cell::from("15.500")));

    let reversed: [&dyn Stage; 2] = [&TotalDurationStage, &DurationsStage];
    let report = run_stages(&table, &reversed).expect("reversed run");
    assert_eq!(report.table.cell(0, 2), Some(&Cell::empty()));
}

#[test]
fn caller_keeps_the_input_table() {
    let table = Table::from_strings([vec!["ZIP"], vec!["7"]]);
    let report = run_stages(&table, &[&ZipStage]).expect("zip run");
    assert_eq!(table.cell(0, 0), Some(&Cell::from("7")));
    assert_eq!(report.table.cell(0, 0), Some(&Cell::from("00007")));
}

#[test]
fn custom_zones_flow_into_timestamp_stage() {
    let config = PipelineConfig::from_names("UTC", "Asia/Tokyo")
        .expect("zones");
    let table = Table::from_strings([
        REQUIRED_COLUMNS.to_vec(),
        vec!["12/31/23 11:00:00 PM", "", "", "", "", "", "", ""],
    ]);
    let report = Pipeline::new(config).run(&table).expect("pipeline");
    assert_eq!(
        report.table.cell(0, 0),
        Some(&Cell::from("2024-01-01T08:00:00+09:00"))
    );
    // Empty durations fail to parse and the total is blanked.
    assert_eq!(report.warnings.len(), 3);
}
