use std::fs;
use std::path::PathBuf;

use normalizer_core::{read_table, write_table, NormalizeError, Pipeline};

const HEADER: &[u8] =
    b"Timestamp,ZIP,FullName,Address,FooDuration,BarDuration,TotalDuration,Notes\n";

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

#[test]
fn normalizes_file_on_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("out.csv");

    let table = read_table(fixture_path("sample.csv")).expect("read fixture");
    let report = Pipeline::default().run(&table).expect("pipeline");
    write_table(&output, &report.table).expect("write output");

    let written = fs::read(&output).expect("read output");
    let expected = fs::read(fixture_path("sample_expected.csv"))
        .expect("read expected");
    assert_eq!(written, expected);
}

#[test]
fn invalid_utf8_is_sanitized_in_notes_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.csv");

    let mut bytes = HEADER.to_vec();
    bytes.extend_from_slice(b"3/10/24 2:30:00 PM,02139,ann lee,");
    bytes.extend_from_slice(b"5 R\xe9e St,0:00:01,0:00:02,,caf\xe9\n");
    fs::write(&input, &bytes).expect("write input");

    let table = read_table(&input).expect("read input");
    let report = Pipeline::default().run(&table).expect("pipeline");
    write_table(&output, &report.table).expect("write output");

    let written = fs::read(&output).expect("read output");
    let line = written.split(|b| *b == b'\n').nth(1).expect("data row");
    let mut expected = b"2024-03-10T17:30:00-04:00,02139,ANN lee,".to_vec();
    expected.extend_from_slice(b"5 R\xe9e St,1.000,2.000,3.000,");
    expected.extend_from_slice("caf\u{FFFD}".as_bytes());
    assert_eq!(line, expected.as_slice());

    let stages: Vec<&str> = report.warnings.iter().map(|w| w.stage).collect();
    assert_eq!(stages, vec!["Address"]);
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = read_table(dir.path().join("nope.csv"))
        .expect_err("file does not exist");
    assert!(matches!(err, NormalizeError::Io { .. }));
}
