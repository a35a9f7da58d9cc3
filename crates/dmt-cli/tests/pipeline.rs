//! Integration tests for the pipeline module.

use std::fs;
use std::path::Path;

use dmt_cli::pipeline::{Pipeline, read_input, read_options};
use dmt_model::{DomainOptions, WriteOptions};
use dmt_transform::reduce;

fn write_input(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write input");
    path
}

#[test]
fn reduced_table_round_trips_through_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_input(dir.path(), "in.csv", "color,size\nred,1\nblue,2\nred,1\n");
    let output = dir.path().join("out.csv");

    let options = read_options(',', true, "?", false).expect("options");
    let mut table = read_input(&input, &options).expect("read");
    reduce(&mut table).expect("reduce");

    let written = Pipeline::new(table, Some(&output))
        .expect("open output")
        .write_table(&WriteOptions::default().with_weights(true))
        .expect("write");
    assert_eq!(written.len(), 2);
    assert_eq!(
        fs::read_to_string(&output).expect("read output"),
        "color,size,weight\nred,1,2\nblue,2,1\n"
    );

    let weighted = read_options(',', true, "?", true).expect("options");
    let reread = read_input(&output, &weighted).expect("reread");
    assert_eq!(reread.len(), 2);
    assert_eq!(reread.total_weight(), 3.0);
}

#[test]
fn domains_are_written_to_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_input(dir.path(), "in.txt", "b;2\na;5\n");
    let output = dir.path().join("domains.txt");

    let options = read_options(';', false, "?", false).expect("options");
    let table = read_input(&input, &options).expect("read");
    Pipeline::new(table, Some(&output))
        .expect("open output")
        .write_domains(&DomainOptions::default())
        .expect("write");

    assert_eq!(
        fs::read_to_string(&output).expect("read output"),
        "dom(A1) = { b, a };\ndom(A2) = ZZ [2, 5];\n"
    );
}

#[test]
fn missing_input_names_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.csv");
    let options = read_options(',', true, "?", false).expect("options");

    let error = read_input(&missing, &options).unwrap_err();
    assert!(format!("{error:#}").contains("absent.csv"));
}

#[test]
fn unwritable_output_fails_before_writing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_input(dir.path(), "in.csv", "x\n1\n");
    let options = read_options(',', true, "?", false).expect("options");
    let table = read_input(&input, &options).expect("read");

    let output = dir.path().join("no-such-dir").join("out.csv");
    let result = Pipeline::new(table, Some(&output));
    assert!(result.is_err());
}
