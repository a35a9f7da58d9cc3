use std::fmt::Display;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dmt_output::format_significant;
use dmt_transform::Classification;

use crate::types::RunReport;

/// Significant digits of ranges and weights in terminal tables.
const SUMMARY_DIGITS: usize = 6;

pub fn print_summary(report: &RunReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Command"), header_cell(report.command)]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    for input in &report.inputs {
        table.add_row(vec![label_cell("Input"), Cell::new(input.display())]);
    }
    if let Some(output) = &report.output {
        table.add_row(vec![label_cell("Output"), Cell::new(output.display())]);
    }
    table.add_row(vec![label_cell("Attributes"), Cell::new(report.attributes)]);
    table.add_row(vec![label_cell("Rows read"), Cell::new(report.input_rows)]);
    table.add_row(vec![
        label_cell("Rows written"),
        Cell::new(report.output_rows).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        label_cell("Total weight"),
        Cell::new(format_significant(report.total_weight, SUMMARY_DIGITS)),
    ]);
    println!("{table}");

    if !report.notes.is_empty() {
        eprintln!("Notes:");
        for note in &report.notes {
            eprintln!("- {note}");
        }
    }
}

pub fn print_classification(classification: &Classification) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Axis"),
        header_cell("Attribute"),
        header_cell("Kind"),
        header_cell("Display range / labels"),
        header_cell("Default"),
    ]);
    apply_table_style(&mut table);

    let horizontal = classification.horizontal().map(|axis| axis.attribute);
    let vertical = classification.vertical().map(|axis| axis.attribute);
    for (index, axis) in classification.metrics().iter().enumerate() {
        let role = if horizontal == Some(axis.attribute) {
            role_cell("horizontal")
        } else if vertical == Some(axis.attribute) {
            role_cell("vertical")
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(format!("M{index}")),
            Cell::new(&axis.name),
            Cell::new(axis.kind),
            Cell::new(format!(
                "[{}, {}]",
                format_significant(axis.range.min, SUMMARY_DIGITS),
                format_significant(axis.range.max, SUMMARY_DIGITS)
            )),
            role,
        ]);
    }

    let class = classification.class().map(|axis| axis.attribute);
    for (index, axis) in classification.nominals().iter().enumerate() {
        let role = if class == Some(axis.attribute) {
            role_cell("class")
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(format!("N{index}")),
            Cell::new(&axis.name),
            Cell::new("nominal"),
            Cell::new(format!("{{ {} }}", axis.labels.join(", "))),
            role,
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Cyan)
}

fn role_cell(role: &str) -> Cell {
    Cell::new(role).fg(Color::Green).add_attribute(Attribute::Bold)
}

fn dim_cell<T: Display>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
