//! Two-pass reader for delimited text tables.
//!
//! The first pass splits the input into records and joins the text class of
//! every cell per column; the second pass coerces each cell into a value of
//! its column's kind.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use dmt_model::coerce::{attribute_for_class, parse_float};
use dmt_model::error::reserve_error;
use dmt_model::{
    Attribute, AttributeKind, AttributeSet, ReadOptions, Table, TableError, TextClass, Tuple,
    Value, WeightColumn, classify_text, coerce,
};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Name of the weight field in error messages.
const WEIGHT: &str = "weight";

/// Records split from the input, before typing.
#[derive(Debug, Clone, Default)]
struct RawTable {
    names: Vec<String>,
    rows: Vec<Vec<String>>,
    weights: Vec<Option<String>>,
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Default name of the column at `index`.
fn default_name(index: usize) -> String {
    format!("A{}", index + 1)
}

/// Read a table from any byte source.
pub fn read_table<R: Read>(reader: R, options: &ReadOptions) -> Result<Table> {
    let raw = split_records(reader, options)?;
    let table = build_table(raw, options)?;
    info!(
        attributes = table.attributes().len(),
        rows = table.len(),
        total_weight = table.total_weight(),
        "read table"
    );
    Ok(table)
}

/// Read a table from a file.
pub fn read_table_from_path(path: &Path, options: &ReadOptions) -> Result<Table> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "reading table");
    read_table(file, options)
}

fn split_records<R: Read>(reader: R, options: &ReadOptions) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let weighted = options.weight_column == WeightColumn::Last;
    // Runs of blanks separate a single pair of fields.
    let collapse_blanks = options.delimiter.is_ascii_whitespace();
    let mut raw = RawTable::default();
    let mut header: Option<Vec<String>> = None;
    let mut width = 0;

    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let mut cells: Vec<String> = record
            .iter()
            .filter(|cell| !(collapse_blanks && cell.is_empty()))
            .map(normalize_header)
            .collect();
        if options.has_header && header.is_none() {
            if weighted {
                cells.pop();
            }
            header = Some(cells);
            continue;
        }
        let weight = if weighted { cells.pop() } else { None };
        width = width.max(cells.len());
        raw.rows
            .try_reserve(1)
            .map_err(reserve_error("raw records"))?;
        raw.rows.push(cells);
        raw.weights.push(weight);
    }

    raw.names = match header {
        Some(names) => {
            if let Some(row) = raw.rows.iter().position(|row| row.len() > names.len()) {
                let cells = &raw.rows[row];
                return Err(TableError::malformed(
                    format!("record {}", row + 1),
                    cells[names.len()..].join(","),
                    format!("{} fields for {} attributes", cells.len(), names.len()),
                )
                .into());
            }
            names
                .into_iter()
                .enumerate()
                .map(|(index, name)| {
                    if name.is_empty() {
                        default_name(index)
                    } else {
                        name
                    }
                })
                .collect()
        }
        None => (0..width).map(default_name).collect(),
    };
    Ok(raw)
}

fn build_table(raw: RawTable, options: &ReadOptions) -> Result<Table> {
    let null_marker = options.null_marker.as_str();
    let mut attributes: Vec<Attribute> = Vec::with_capacity(raw.names.len());
    for (column, name) in raw.names.iter().enumerate() {
        let class = raw
            .rows
            .iter()
            .filter_map(|row| row.get(column))
            .map(|cell| classify_text(cell, null_marker))
            .fold(TextClass::Null, TextClass::join);
        let mut attribute = attribute_for_class(name.as_str(), class);
        if let Some(bounds) = attribute.integer_domain_mut() {
            bounds.null_sentinel = options.null_sentinel;
        }
        if let Some(bounds) = attribute.float_domain_mut() {
            bounds.precision = options.float_precision;
            bounds.null_sentinel = options.null_sentinel.map(|sentinel| sentinel as f64);
        }
        debug!(attribute = %name, kind = %attribute.kind(), "typed column");
        attributes.push(attribute);
    }

    let mut tuples = Vec::new();
    tuples
        .try_reserve_exact(raw.rows.len())
        .map_err(reserve_error("tuples"))?;
    for (row, (cells, weight)) in raw.rows.iter().zip(&raw.weights).enumerate() {
        let mut values = Vec::with_capacity(attributes.len());
        for (column, attribute) in attributes.iter_mut().enumerate() {
            let value = match cells.get(column) {
                Some(text) => coerce(attribute, text, null_marker)?,
                None => Value::Null,
            };
            values.push(value);
        }
        let tuple = match weight {
            Some(text) => Tuple::weighted(values, parse_weight(row, text)?),
            None => Tuple::new(values),
        };
        tuples.push(tuple);
    }

    let nominal = attributes
        .iter()
        .filter(|attribute| attribute.kind() == AttributeKind::Nominal)
        .count();
    debug!(
        nominal,
        metric = attributes.len() - nominal,
        "typed all columns"
    );
    let attributes = AttributeSet::from_attributes(attributes)?;
    Ok(Table::from_parts(attributes, tuples)?)
}

fn parse_weight(row: usize, text: &str) -> Result<f64> {
    let weight = parse_float(WEIGHT, text)?;
    if weight < 0.0 {
        return Err(TableError::malformed(
            WEIGHT,
            text,
            format!("record {}: weight must not be negative", row + 1),
        )
        .into());
    }
    Ok(weight)
}
