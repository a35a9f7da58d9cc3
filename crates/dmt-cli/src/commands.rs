use anyhow::{Context, Result};
use dmt_cli::pipeline::{Pipeline, read_input, read_options};
use dmt_model::{
    CoverageMode, CoverageOptions, DomainOptions, NormalizeOptions, ReadOptions, SortDirection,
    Table, WriteOptions,
};
use dmt_transform::{
    LabelComparator, NormalizeOutcome, build_coverage, classify, merge, normalize_all,
    normalize_column_by_name, project, reduce, sort_all_domains, sort_table,
};
use tracing::{info, info_span, warn};

use crate::cli::{
    ClassifyArgs, CoverageArgs, DomainSortArg, DomainsArgs, MergeArgs, NormalizeArgs, ProjectArgs,
    ReadArgs, ReduceArgs, SortArgs, WriteArgs,
};
use crate::summary::print_classification;
use crate::types::RunReport;

pub fn run_domains(args: &DomainsArgs) -> Result<RunReport> {
    let span = info_span!("domains", input = %args.input.display());
    let _guard = span.enter();

    let mut table = read_input(&args.input, &reader_options(&args.read)?)?;
    let mut report = RunReport::new("domains", vec![args.input.clone()], args.output.clone());
    report.input_rows = table.len();

    let comparator = match args.sort {
        DomainSortArg::Lex => Some(LabelComparator::Lexicographic),
        DomainSortArg::Numeric => Some(LabelComparator::Numeric),
        DomainSortArg::None => None,
    };
    if let Some(comparator) = comparator {
        let sorted = sort_all_domains(&mut table, &comparator)?;
        info!(domains = sorted, ?comparator, "sorted nominal domains");
    }

    let options = DomainOptions::default()
        .with_intervals(args.intervals)
        .with_max_width(args.width);
    let table = Pipeline::new(table, args.output.as_deref())?.write_domains(&options)?;
    Ok(finish_report(report, &table))
}

pub fn run_reduce(args: &ReduceArgs) -> Result<RunReport> {
    let span = info_span!("reduce", input = %args.input.display());
    let _guard = span.enter();

    let mut table = read_input(&args.input, &reader_options(&args.read)?)?;
    let mut report = RunReport::new("reduce", vec![args.input.clone()], args.write.output.clone());
    let summary = reduce(&mut table)?;
    report.input_rows = summary.input_rows;
    info!(
        input_rows = summary.input_rows,
        output_rows = summary.output_rows,
        "reduced duplicate tuples"
    );

    let options = writer_options(&args.read, &args.write, true);
    let table = Pipeline::new(table, args.write.output.as_deref())?.write_table(&options)?;
    Ok(finish_report(report, &table))
}

pub fn run_coverage(args: &CoverageArgs) -> Result<RunReport> {
    let span = info_span!("coverage", input = %args.input.display());
    let _guard = span.enter();

    let mut table = read_input(&args.input, &reader_options(&args.read)?)?;
    let mut report =
        RunReport::new("coverage", vec![args.input.clone()], args.write.output.clone());
    report.input_rows = table.len();
    reduce(&mut table)?;

    let mode = if args.full {
        CoverageMode::Full
    } else {
        CoverageMode::Condensed
    };
    let options = CoverageOptions::default()
        .with_mode(mode)
        .with_normalize(args.normalize);
    let coverage = build_coverage(&table, options)?;
    info!(
        tuples = table.len(),
        rows = coverage.len(),
        ?mode,
        normalize = args.normalize,
        "built coverage table"
    );

    let options = writer_options(&args.read, &args.write, true);
    let table = Pipeline::new(coverage, args.write.output.as_deref())?.write_table(&options)?;
    Ok(finish_report(report, &table))
}

pub fn run_project(args: &ProjectArgs) -> Result<RunReport> {
    let span = info_span!("project", input = %args.input.display());
    let _guard = span.enter();

    let table = read_input(&args.input, &reader_options(&args.read)?)?;
    let mut report = RunReport::new("project", vec![args.input.clone()], args.write.output.clone());
    report.input_rows = table.len();

    let mut projected = project(&table, &args.columns)
        .with_context(|| format!("project columns {}", args.columns.join(",")))?;
    drop(table);
    if args.reduce {
        reduce(&mut projected)?;
    }

    let options = writer_options(&args.read, &args.write, args.reduce);
    let table = Pipeline::new(projected, args.write.output.as_deref())?.write_table(&options)?;
    Ok(finish_report(report, &table))
}

pub fn run_merge(args: &MergeArgs) -> Result<RunReport> {
    let span = info_span!("merge", inputs = args.inputs.len());
    let _guard = span.enter();

    let options = reader_options(&args.read)?;
    let mut tables = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        tables.push(read_input(input, &options)?);
    }
    let mut report = RunReport::new("merge", args.inputs.clone(), args.write.output.clone());
    report.input_rows = tables.iter().map(Table::len).sum();

    let merged = merge(tables).context("merge input tables")?;
    let options = writer_options(&args.read, &args.write, false);
    let table = Pipeline::new(merged, args.write.output.as_deref())?.write_table(&options)?;
    Ok(finish_report(report, &table))
}

pub fn run_sort(args: &SortArgs) -> Result<RunReport> {
    let span = info_span!("sort", input = %args.input.display());
    let _guard = span.enter();

    let mut table = read_input(&args.input, &reader_options(&args.read)?)?;
    let mut report = RunReport::new("sort", vec![args.input.clone()], args.write.output.clone());
    report.input_rows = table.len();

    let direction = if args.descending {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    sort_table(&mut table, &args.keys, direction)?;

    let options = writer_options(&args.read, &args.write, false);
    let table = Pipeline::new(table, args.write.output.as_deref())?.write_table(&options)?;
    Ok(finish_report(report, &table))
}

pub fn run_normalize(args: &NormalizeArgs) -> Result<RunReport> {
    let span = info_span!("normalize", input = %args.input.display());
    let _guard = span.enter();

    let mut table = read_input(&args.input, &reader_options(&args.read)?)?;
    let mut report =
        RunReport::new("normalize", vec![args.input.clone()], args.write.output.clone());
    report.input_rows = table.len();

    let options = NormalizeOptions {
        center: args.center,
        scale: args.scale,
    };
    let outcomes = if args.columns.is_empty() {
        normalize_all(&mut table, options)?
            .into_iter()
            .map(|(attribute, outcome)| {
                let name = table
                    .attributes()
                    .get(attribute)
                    .map(|attribute| attribute.name().to_string())
                    .unwrap_or_default();
                (name, outcome)
            })
            .collect::<Vec<_>>()
    } else {
        let mut outcomes = Vec::with_capacity(args.columns.len());
        for name in &args.columns {
            let outcome = normalize_column_by_name(&mut table, name, options)
                .with_context(|| format!("normalize column {name}"))?;
            outcomes.push((name.clone(), outcome));
        }
        outcomes
    };
    for (name, outcome) in &outcomes {
        if let NormalizeOutcome::Unchanged { reason } = outcome {
            warn!(column = %name, %reason, "column left unchanged");
            report.notes.push(format!("{name}: left unchanged ({reason})"));
        }
    }

    let options = writer_options(&args.read, &args.write, false);
    let table = Pipeline::new(table, args.write.output.as_deref())?.write_table(&options)?;
    Ok(finish_report(report, &table))
}

pub fn run_classify(args: &ClassifyArgs) -> Result<RunReport> {
    let span = info_span!("classify", input = %args.input.display());
    let _guard = span.enter();

    let table = read_input(&args.input, &reader_options(&args.read)?)?;
    let classification = classify(&table, args.padding)?;
    if args.json {
        let json = serde_json::to_string_pretty(&classification)
            .context("serialize classification")?;
        println!("{json}");
    } else {
        print_classification(&classification);
    }

    let mut report = RunReport::new("classify", vec![args.input.clone()], None);
    report.input_rows = table.len();
    Ok(finish_report(report, &table))
}

fn reader_options(args: &ReadArgs) -> Result<ReadOptions> {
    let options = read_options(
        args.delimiter,
        !args.no_header,
        &args.null_marker,
        args.weighted,
    )?;
    Ok(options
        .with_float_precision(args.precision)
        .with_null_sentinel(args.null_value))
}

/// Output mirrors the input layout; weights are written when asked for or
/// when the command produced them.
fn writer_options(read: &ReadArgs, write: &WriteArgs, weights: bool) -> WriteOptions {
    WriteOptions::default()
        .with_delimiter(read.delimiter)
        .with_header(!read.no_header)
        .with_null_marker(read.null_marker.as_str())
        .with_align(write.align)
        .with_weights(weights || write.write_weights || read.weighted)
}

fn finish_report(mut report: RunReport, table: &Table) -> RunReport {
    report.output_rows = table.len();
    report.attributes = table.attributes().len();
    report.total_weight = table.total_weight();
    report
}
