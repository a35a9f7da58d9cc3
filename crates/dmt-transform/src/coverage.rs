//! One-point coverage tables.
//!
//! A coverage row carries a single (attribute, value) pair, all other
//! attributes null, and the weight of the tuples exhibiting that value.
//! Rows are emitted attribute by attribute, and within an attribute in the
//! order the values first occur in the table.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use dmt_model::error::reserve_error;
use dmt_model::{CoverageMode, CoverageOptions, Result, Table, Tuple, Value};
use tracing::debug;

/// One coverage row before it is expanded to a full value vector.
#[derive(Debug, Clone, Copy)]
struct Cell {
    attribute: usize,
    value: Value,
    weight: f64,
}

/// Build the coverage table of `table`.
///
/// The source is not modified. On error nothing is returned; the partially
/// built rows are dropped with the error.
pub fn build_coverage(table: &Table, options: CoverageOptions) -> Result<Table> {
    let width = table.attributes().len();
    let mut cells = match options.mode {
        CoverageMode::Full => full_cells(table, width)?,
        CoverageMode::Condensed => condensed_cells(table, width)?,
    };
    if options.normalize {
        normalize_by_attribute(&mut cells, width);
    }
    let mut rows = Vec::new();
    rows.try_reserve_exact(cells.len())
        .map_err(reserve_error("coverage rows"))?;
    rows.extend(cells.iter().map(|cell| {
        let mut values = vec![Value::Null; width];
        values[cell.attribute] = cell.value;
        Tuple::weighted(values, cell.weight)
    }));
    debug!(
        mode = ?options.mode,
        normalize = options.normalize,
        input_rows = table.len(),
        output_rows = rows.len(),
        "built coverage table"
    );
    Table::from_parts(table.attributes().clone(), rows)
}

/// Non-null cells of the table, attribute by attribute.
fn occurrences(table: &Table, width: usize) -> impl Iterator<Item = Cell> + '_ {
    (0..width).flat_map(move |attribute| {
        table
            .column(attribute)
            .filter(|(value, _)| !value.is_null())
            .map(move |(value, weight)| Cell {
                attribute,
                value,
                weight,
            })
    })
}

/// One row per non-null cell, each with its tuple's weight.
fn full_cells(table: &Table, width: usize) -> Result<Vec<Cell>> {
    let count = occurrences(table, width).count();
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(count)
        .map_err(reserve_error("coverage cells"))?;
    cells.extend(occurrences(table, width));
    Ok(cells)
}

/// Rows with identical value vectors merged and their weights summed.
///
/// A coverage row is determined by its (attribute, value) pair, so that
/// pair serves as the key of the full value vector.
fn condensed_cells(table: &Table, width: usize) -> Result<Vec<Cell>> {
    let mut index: HashMap<(usize, Value), usize> = HashMap::new();
    let mut cells: Vec<Cell> = Vec::new();
    for cell in occurrences(table, width) {
        match index.entry((cell.attribute, cell.value)) {
            Entry::Occupied(entry) => cells[*entry.get()].weight += cell.weight,
            Entry::Vacant(entry) => {
                cells
                    .try_reserve(1)
                    .map_err(reserve_error("coverage cells"))?;
                entry.insert(cells.len());
                cells.push(cell);
            }
        }
    }
    Ok(cells)
}

/// Divide each row's weight by the largest weight of its attribute.
///
/// Attributes whose largest weight is zero keep their weights.
fn normalize_by_attribute(cells: &mut [Cell], width: usize) {
    let mut maxima = vec![0.0f64; width];
    for cell in cells.iter() {
        maxima[cell.attribute] = maxima[cell.attribute].max(cell.weight);
    }
    for cell in cells.iter_mut() {
        let max = maxima[cell.attribute];
        if max > 0.0 {
            cell.weight /= max;
        }
    }
}
