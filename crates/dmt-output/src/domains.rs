//! Textual description of attribute domains.
//!
//! One statement per attribute:
//!
//! ```text
//! dom(color) = { red, green, blue };
//! dom(size) = ZZ [1, 12];
//! dom(weight) = IR { 0.5, 1.25 };
//! ```
//!
//! Statements longer than the configured width are wrapped at word
//! boundaries; continuation lines are indented.

use std::io::Write;

use dmt_model::{AttributeDomain, DomainOptions, Table, Value};
use tracing::debug;

use crate::error::Result;
use crate::format::format_significant;

const INDENT: &str = "    ";

/// Write the domain of every attribute of `table`.
pub fn write_domains<W: Write>(
    mut writer: W,
    table: &Table,
    options: &DomainOptions,
) -> Result<()> {
    for attribute in 0..table.attributes().len() {
        for line in wrap(&domain_words(table, attribute, options), options.max_width) {
            writeln!(writer, "{line}")?;
        }
    }
    writer.flush()?;
    debug!(
        attributes = table.attributes().len(),
        intervals = options.intervals,
        "wrote domain description"
    );
    Ok(())
}

/// The words of one domain statement, terminator included.
fn domain_words(table: &Table, attribute: usize, options: &DomainOptions) -> Vec<String> {
    let Some(target) = table.attributes().get(attribute) else {
        return Vec::new();
    };
    let mut words = vec![format!("dom({})", quote(target.name())), "=".to_string()];
    match target.domain() {
        AttributeDomain::Nominal { values } => {
            words.extend(braced(values.iter().map(quote).collect()));
        }
        AttributeDomain::Integer { bounds } => {
            words.push("ZZ".to_string());
            if !options.intervals {
                let mut seen: Vec<i64> = table
                    .column(attribute)
                    .filter_map(|(value, _)| match value {
                        Value::Integer(value) => Some(value),
                        _ => None,
                    })
                    .collect();
                seen.sort_unstable();
                seen.dedup();
                words.extend(braced(seen.iter().map(i64::to_string).collect()));
            } else if bounds.is_bounded() {
                words.push(format!("[{},", bounds.min));
                words.push(format!("{}]", bounds.max));
            }
        }
        AttributeDomain::Float { bounds } => {
            words.push("IR".to_string());
            let digits = bounds.precision;
            if !options.intervals {
                let mut seen: Vec<f64> = table
                    .column(attribute)
                    .filter_map(|(value, _)| match value {
                        Value::Float(value) => Some(value),
                        _ => None,
                    })
                    .collect();
                seen.sort_unstable_by(f64::total_cmp);
                seen.dedup();
                words.extend(braced(
                    seen.iter()
                        .map(|&value| format_significant(value, digits))
                        .collect(),
                ));
            } else if bounds.is_bounded() {
                words.push(format!("[{},", format_significant(bounds.min, digits)));
                words.push(format!("{}]", format_significant(bounds.max, digits)));
            }
        }
    }
    if let Some(last) = words.last_mut() {
        last.push(';');
    }
    words
}

/// `{ a, b, c }` as separate words.
fn braced(items: Vec<String>) -> Vec<String> {
    let count = items.len();
    let mut words = Vec::with_capacity(count + 2);
    words.push("{".to_string());
    for (index, mut item) in items.into_iter().enumerate() {
        if index + 1 < count {
            item.push(',');
        }
        words.push(item);
    }
    words.push("}".to_string());
    words
}

/// Quote names and labels that would not read back as one word.
fn quote(text: &str) -> String {
    let plain = !text.is_empty()
        && !text
            .chars()
            .any(|ch| ch.is_whitespace() || matches!(ch, ',' | ';' | '{' | '}' | '(' | ')' | '"'));
    if plain {
        text.to_string()
    } else {
        format!("\"{}\"", text.replace('"', "\\\""))
    }
}

/// Greedy word wrap; a word longer than the width gets a line of its own.
fn wrap(words: &[String], max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in words {
        if line.is_empty() {
            line.push_str(word);
        } else if line.chars().count() + 1 + word.chars().count() > max_width {
            lines.push(std::mem::take(&mut line));
            line.push_str(INDENT);
            line.push_str(word);
        } else {
            line.push(' ');
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|word| (*word).to_string()).collect()
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let lines = wrap(&words(&["dom(x)", "=", "{", "alpha,", "beta", "};"]), 16);
        assert_eq!(lines, vec!["dom(x) = {", "    alpha, beta", "    };"]);
    }

    #[test]
    fn quotes_awkward_labels() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote("two words"), "\"two words\"");
        assert_eq!(quote(""), "\"\"");
    }
}
