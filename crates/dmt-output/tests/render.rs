//! Snapshot tests for rendered tables and domain descriptions.

use dmt_model::{Attribute, AttributeSet, DomainOptions, Table, Tuple, Value, WriteOptions};
use dmt_output::{write_domains, write_table};

fn produce() -> Table {
    let mut size = Attribute::integer("size");
    if let Some(bounds) = size.integer_domain_mut() {
        bounds.widen(1);
        bounds.widen(12);
    }
    let mut price = Attribute::float("price");
    if let Some(bounds) = price.float_domain_mut() {
        bounds.widen(0.5);
        bounds.widen(1.25);
    }
    let attributes = AttributeSet::from_attributes([
        Attribute::nominal_with("color", ["red", "green", "blue"]),
        size,
        price,
    ])
    .expect("attributes");
    Table::from_parts(
        attributes,
        vec![
            Tuple::new(vec![Value::Nominal(0), Value::Integer(1), Value::Float(0.5)]),
            Tuple::weighted(vec![Value::Nominal(2), Value::Integer(12), Value::Null], 3.0),
            Tuple::new(vec![Value::Nominal(0), Value::Integer(1), Value::Float(1.25)]),
        ],
    )
    .expect("table")
}

fn domains(options: &DomainOptions) -> String {
    let mut buffer = Vec::new();
    write_domains(&mut buffer, &produce(), options).expect("write domains");
    String::from_utf8(buffer).expect("utf-8")
}

fn table(options: &WriteOptions) -> String {
    let mut buffer = Vec::new();
    write_table(&mut buffer, &produce(), options).expect("write table");
    String::from_utf8(buffer).expect("utf-8")
}

#[test]
fn domain_intervals() {
    insta::assert_snapshot!(domains(&DomainOptions::default()).trim_end(), @r"
    dom(color) = { red, green, blue };
    dom(size) = ZZ [1, 12];
    dom(price) = IR [0.5, 1.25];
    ");
}

#[test]
fn domain_value_lists() {
    let options = DomainOptions::default().with_intervals(false);
    insta::assert_snapshot!(domains(&options).trim_end(), @r"
    dom(color) = { red, green, blue };
    dom(size) = ZZ { 1, 12 };
    dom(price) = IR { 0.5, 1.25 };
    ");
}

#[test]
fn domain_wrapping() {
    let options = DomainOptions::default().with_max_width(20);
    insta::assert_snapshot!(domains(&options).trim_end(), @r"
    dom(color) = { red,
        green, blue };
    dom(size) = ZZ [1,
        12];
    dom(price) = IR
        [0.5, 1.25];
    ");
}

#[test]
fn aligned_table() {
    let options = WriteOptions::default().with_align(true);
    insta::assert_snapshot!(table(&options).trim_end(), @r"
    color,size,price
    red  ,1   ,0.5
    blue ,12  ,?
    red  ,1   ,1.25
    ");
}

#[test]
fn aligned_table_with_blank_delimiter() {
    let options = WriteOptions::default().with_align(true).with_delimiter(' ');
    insta::assert_snapshot!(table(&options).trim_end(), @r"
    color size price
    red   1    0.5
    blue  12   ?
    red   1    1.25
    ");
}

#[test]
fn weighted_table_without_header() {
    let options = WriteOptions::default()
        .with_header(false)
        .with_weights(true)
        .with_delimiter(' ');
    insta::assert_snapshot!(table(&options).trim_end(), @r"
    red 1 0.5 1
    blue 12 ? 3
    red 1 1.25 1
    ");
}
