//! Delimited text output of tables.

use std::io::Write;

use csv::{QuoteStyle, WriterBuilder};
use dmt_model::{Table, WriteOptions};
use tracing::debug;

use crate::error::{OutputError, Result};
use crate::format::{format_weight, render_value};

/// Header of the trailing weight field.
pub const WEIGHT_HEADER: &str = "weight";

/// Write `table` as delimited text.
///
/// With `align` set every field except the last of a row is right-padded
/// with spaces to the width of its column, and fields are never quoted.
/// Weights are written in their shortest exact form.
pub fn write_table<W: Write>(writer: W, table: &Table, options: &WriteOptions) -> Result<()> {
    let delimiter = u8::try_from(options.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(OutputError::Delimiter {
            delimiter: options.delimiter,
        })?;

    let mut rows = Vec::with_capacity(table.len() + usize::from(options.header));
    if options.header {
        let mut names: Vec<String> = table.attributes().names().map(str::to_string).collect();
        if options.write_weights {
            names.push(WEIGHT_HEADER.to_string());
        }
        rows.push(names);
    }
    for tuple in table {
        let mut cells: Vec<String> = tuple
            .values()
            .iter()
            .enumerate()
            .map(|(attribute, value)| render_value(table, attribute, value, &options.null_marker))
            .collect();
        if options.write_weights {
            cells.push(format_weight(tuple.weight()));
        }
        rows.push(cells);
    }

    if options.align {
        align_columns(&mut rows);
    }

    let quote_style = if options.align {
        QuoteStyle::Never
    } else {
        QuoteStyle::Necessary
    };
    let mut out = WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .quote_style(quote_style)
        .from_writer(writer);
    for row in &rows {
        out.write_record(row)?;
    }
    out.flush()?;
    debug!(
        rows = table.len(),
        header = options.header,
        weights = options.write_weights,
        "wrote table"
    );
    Ok(())
}

fn align_columns(rows: &mut [Vec<String>]) {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; columns];
    for row in rows.iter() {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    for row in rows.iter_mut() {
        let last = row.len().saturating_sub(1);
        for (cell, &width) in row.iter_mut().zip(&widths).take(last) {
            let padding = width.saturating_sub(cell.chars().count());
            cell.extend(std::iter::repeat_n(' ', padding));
        }
    }
}
