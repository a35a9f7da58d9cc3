//! Integration tests for reading tables from files.

use std::fs;

use dmt_ingest::{IngestError, read_table_from_path};
use dmt_model::{AttributeKind, ReadOptions, Value, WeightColumn};

#[test]
fn reads_weighted_file_with_custom_null_marker() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("survey.csv");
    fs::write(
        &path,
        "region;visits;score;w\nnorth;3;NA;2\nsouth;NA;0.5;1\n\nnorth;1;1e2;0.5\n",
    )
    .expect("write file");

    let options = ReadOptions::default()
        .with_delimiter(b';')
        .with_null_marker("NA")
        .with_weight_column(WeightColumn::Last);
    let table = read_table_from_path(&path, &options).expect("read table");

    assert_eq!(table.len(), 3);
    assert_eq!(table.total_weight(), 3.5);

    let region = table.attributes().by_name("region").expect("region");
    let labels: Vec<&str> = region
        .nominal_domain()
        .map(|domain| domain.iter().collect())
        .unwrap_or_default();
    assert_eq!(labels, vec!["north", "south"]);

    let visits = table.attributes().by_name("visits").expect("visits");
    assert_eq!(visits.kind(), AttributeKind::Integer);
    let bounds = visits.integer_domain().expect("bounds");
    assert_eq!((bounds.min, bounds.max), (1, 3));

    let score = table.attributes().by_name("score").expect("score");
    assert_eq!(score.kind(), AttributeKind::Float);
    assert_eq!(table.tuples()[2].values()[2], Value::Float(100.0));
    assert_eq!(table.tuples()[0].values()[2], Value::Null);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.csv");
    let error = read_table_from_path(&path, &ReadOptions::default()).unwrap_err();
    assert!(matches!(error, IngestError::Open { .. }));
    assert!(error.to_string().contains("absent.csv"));
}

#[test]
fn empty_file_reads_as_empty_table() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").expect("write file");
    let table = read_table_from_path(&path, &ReadOptions::default()).expect("read table");
    assert!(table.is_empty());
    assert!(table.attributes().is_empty());
}
