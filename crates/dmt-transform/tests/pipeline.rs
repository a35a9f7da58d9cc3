//! End-to-end transformation scenarios over small hand-built tables.

use dmt_model::{
    Attribute, AttributeSet, CoverageMode, CoverageOptions, NormalizeOptions, SortDirection,
    Table, TableError, Tuple, Value,
};
use dmt_transform::normalize::float_column;
use dmt_transform::{
    LabelComparator, NormalizeOutcome, build_coverage, classify, column_stats, normalize_column,
    reduce, sort_all_domains, sort_table,
};

fn example() -> Table {
    let attributes = AttributeSet::from_attributes([
        Attribute::nominal_with("A", ["x", "y"]),
        Attribute::integer("B"),
    ])
    .expect("attributes");
    Table::from_parts(
        attributes,
        vec![
            Tuple::new(vec![Value::Nominal(0), Value::Integer(1)]),
            Tuple::new(vec![Value::Nominal(0), Value::Integer(1)]),
            Tuple::new(vec![Value::Nominal(1), Value::Integer(2)]),
        ],
    )
    .expect("table")
}

fn series(values: &[f64]) -> Table {
    let attributes =
        AttributeSet::from_attributes([Attribute::float("v")]).expect("attributes");
    let tuples = values
        .iter()
        .map(|&value| Tuple::new(vec![Value::Float(value)]))
        .collect();
    Table::from_parts(attributes, tuples).expect("table")
}

#[test]
fn reduce_then_condensed_coverage() {
    let mut table = example();
    let summary = reduce(&mut table).expect("reduce");
    assert_eq!(summary.input_rows, 3);
    assert_eq!(summary.output_rows, 2);
    assert_eq!(
        table.tuples(),
        &[
            Tuple::weighted(vec![Value::Nominal(0), Value::Integer(1)], 2.0),
            Tuple::weighted(vec![Value::Nominal(1), Value::Integer(2)], 1.0),
        ]
    );

    let coverage = build_coverage(&table, CoverageOptions::default()).expect("coverage");
    assert_eq!(
        coverage.tuples(),
        &[
            Tuple::weighted(vec![Value::Nominal(0), Value::Null], 2.0),
            Tuple::weighted(vec![Value::Nominal(1), Value::Null], 1.0),
            Tuple::weighted(vec![Value::Null, Value::Integer(1)], 2.0),
            Tuple::weighted(vec![Value::Null, Value::Integer(2)], 1.0),
        ]
    );
}

#[test]
fn full_coverage_of_unreduced_table_condenses_to_the_same_weights() {
    let table = example();
    let full = build_coverage(&table, CoverageOptions::default().with_mode(CoverageMode::Full))
        .expect("coverage");
    assert_eq!(full.len(), 6);
    assert_eq!(full.total_weight(), 6.0);

    let mut condensed = full;
    reduce(&mut condensed).expect("reduce");
    let direct = build_coverage(&table, CoverageOptions::default()).expect("coverage");
    assert_eq!(condensed.tuples(), direct.tuples());
}

#[test]
fn standardizing_gives_zero_mean_and_unit_deviation() {
    let mut table = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let outcome = normalize_column(&mut table, 0, NormalizeOptions::standardize(0.0, 1.0))
        .expect("normalize");
    assert!(matches!(outcome, NormalizeOutcome::Rescaled { .. }));

    let stats = column_stats(&table, 0);
    assert!(stats.mean.abs() < 1e-12);
    assert!((stats.deviation - 1.0).abs() < 1e-12);
}

#[test]
fn range_mapping_onto_unit_interval() {
    let mut table = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    normalize_column(&mut table, 0, NormalizeOptions::range(0.0, 1.0)).expect("normalize");
    assert_eq!(
        float_column(&table, 0),
        vec![Some(0.0), Some(0.25), Some(0.5), Some(0.75), Some(1.0)]
    );
    let bounds = table
        .attributes()
        .get(0)
        .and_then(Attribute::float_domain)
        .expect("float domain");
    assert_eq!((bounds.min, bounds.max), (0.0, 1.0));
}

#[test]
fn unknown_sort_key_leaves_table_unchanged() {
    let mut table = example();
    let before = table.clone();
    let error = sort_table(&mut table, &["B", "missing"], SortDirection::Descending).unwrap_err();
    assert_eq!(error, TableError::unknown_attribute("missing"));
    assert_eq!(table, before);
}

#[test]
fn numeric_domain_sort_then_classify() {
    let attributes = AttributeSet::from_attributes([
        Attribute::nominal_with("size", ["10", "9", "100"]),
        Attribute::integer("n"),
    ])
    .expect("attributes");
    let mut table = Table::from_parts(
        attributes,
        vec![
            Tuple::new(vec![Value::Nominal(0), Value::Integer(1)]),
            Tuple::new(vec![Value::Nominal(1), Value::Null]),
        ],
    )
    .expect("table");

    let sorted = sort_all_domains(&mut table, &LabelComparator::Numeric).expect("sort");
    assert_eq!(sorted, 1);
    assert_eq!(table.label(0, &table.tuples()[0].values()[0]), Some("10"));
    assert_eq!(table.tuples()[1].values()[0], Value::Nominal(0));

    let classification = classify(&table, 0.1).expect("classify");
    let class = classification.class().expect("class axis");
    assert_eq!(class.labels, vec!["9", "10", "100"]);
    assert!(classification.vertical().is_none());
}
