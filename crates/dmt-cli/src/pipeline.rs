//! Read, transform and write stages shared by every command.
//!
//! A command reads its input tables first, then opens its destination and
//! hands both to a [`Pipeline`], which owns them until the result has been
//! written. Whatever path a command returns by, the table and the writer are
//! dropped with the pipeline, so a failed run never leaves a half-open
//! destination behind.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use dmt_ingest::{read_table, read_table_from_path};
use dmt_model::{DomainOptions, ReadOptions, Table, WeightColumn, WriteOptions};
use dmt_output::{write_domains, write_table};
use tracing::{debug, info};

/// Path that stands for stdin or stdout.
pub const STDIO: &str = "-";

/// Build reader options from the shared command-line settings.
pub fn read_options(
    delimiter: char,
    has_header: bool,
    null_marker: &str,
    weighted: bool,
) -> Result<ReadOptions> {
    let Ok(byte) = u8::try_from(delimiter) else {
        bail!("delimiter {delimiter:?} is not a single-byte character");
    };
    if !byte.is_ascii() {
        bail!("delimiter {delimiter:?} is not a single-byte character");
    }
    let weight_column = if weighted {
        WeightColumn::Last
    } else {
        WeightColumn::None
    };
    Ok(ReadOptions::default()
        .with_delimiter(byte)
        .with_header(has_header)
        .with_null_marker(null_marker)
        .with_weight_column(weight_column))
}

/// Read one input table; `-` reads stdin.
pub fn read_input(path: &Path, options: &ReadOptions) -> Result<Table> {
    let table = if path.as_os_str() == STDIO {
        read_table(io::stdin().lock(), options).context("read table from stdin")?
    } else {
        read_table_from_path(path, options)
            .with_context(|| format!("read table: {}", path.display()))?
    };
    debug!(
        input = %path.display(),
        attributes = table.attributes().len(),
        rows = table.len(),
        "read input"
    );
    Ok(table)
}

/// Open the destination; `None` or `-` writes to stdout.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) if path.as_os_str() != STDIO => {
            let file = File::create(path)
                .with_context(|| format!("create output: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// A table on its way to a destination.
pub struct Pipeline {
    table: Table,
    writer: Box<dyn Write>,
    destination: Option<PathBuf>,
}

impl Pipeline {
    /// Take ownership of `table` and open the destination.
    pub fn new(table: Table, output: Option<&Path>) -> Result<Self> {
        let writer = open_output(output)?;
        Ok(Self::with_writer(table, writer, output.map(Path::to_path_buf)))
    }

    /// Pipeline writing to an already open writer.
    pub fn with_writer(table: Table, writer: Box<dyn Write>, destination: Option<PathBuf>) -> Self {
        Self {
            table,
            writer,
            destination,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    /// Swap in a derived table, such as a coverage or projection.
    pub fn replace_table(&mut self, table: Table) {
        self.table = table;
    }

    /// Write the table as delimited text and hand it back.
    pub fn write_table(mut self, options: &WriteOptions) -> Result<Table> {
        write_table(&mut self.writer, &self.table, options)
            .with_context(|| format!("write table to {}", self.describe_destination()))?;
        self.finish()
    }

    /// Write the domain description and hand the table back.
    pub fn write_domains(mut self, options: &DomainOptions) -> Result<Table> {
        write_domains(&mut self.writer, &self.table, options)
            .with_context(|| format!("write domains to {}", self.describe_destination()))?;
        self.finish()
    }

    fn finish(mut self) -> Result<Table> {
        self.writer
            .flush()
            .with_context(|| format!("flush {}", self.describe_destination()))?;
        info!(
            destination = %self.describe_destination(),
            rows = self.table.len(),
            "wrote output"
        );
        Ok(self.table)
    }

    fn describe_destination(&self) -> String {
        match &self.destination {
            Some(path) if path.as_os_str() != STDIO => path.display().to_string(),
            _ => "stdout".to_string(),
        }
    }
}
