//! Text rendering of cell values.

use dmt_model::{DEFAULT_PRECISION, Table, Value};

/// Render `value` with `digits` significant digits, like C's `%g`.
///
/// Fixed notation is used when the decimal exponent lies in
/// `-4..digits`, scientific notation otherwise; trailing zeros are dropped
/// in both.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    let precision = i32::try_from(digits).unwrap_or(i32::MAX);
    if exponent < -4 || exponent >= precision {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = usize::try_from(precision - 1 - exponent).unwrap_or(0);
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

/// Render a tuple weight so that reading it back yields the same value.
pub fn format_weight(weight: f64) -> String {
    weight.to_string()
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Text of one cell of `table`.
pub fn render_value(table: &Table, attribute: usize, value: &Value, null_marker: &str) -> String {
    match value {
        Value::Nominal(_) => table.label(attribute, value).unwrap_or_default().to_string(),
        Value::Integer(value) => value.to_string(),
        Value::Float(value) => {
            let digits = table
                .attributes()
                .get(attribute)
                .and_then(|attribute| attribute.precision())
                .unwrap_or(DEFAULT_PRECISION);
            format_significant(*value, digits)
        }
        Value::Null => null_marker.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_notation_drops_trailing_zeros() {
        assert_eq!(format_significant(100.0, 6), "100");
        assert_eq!(format_significant(0.5, 6), "0.5");
        assert_eq!(format_significant(-2.5, 6), "-2.5");
        assert_eq!(format_significant(0.0001, 6), "0.0001");
        assert_eq!(format_significant(1.0 / 3.0, 3), "0.333");
        assert_eq!(format_significant(2.0 / 3.0, 6), "0.666667");
    }

    #[test]
    fn scientific_notation_outside_fixed_range() {
        assert_eq!(format_significant(1_234_567.0, 6), "1.23457e+06");
        assert_eq!(format_significant(0.00001, 6), "1e-05");
        assert_eq!(format_significant(123.0, 2), "1.2e+02");
    }

    #[test]
    fn rounding_can_raise_the_exponent() {
        assert_eq!(format_significant(99.99999, 6), "100");
        assert_eq!(format_significant(999_999.7, 6), "1e+06");
    }

    #[test]
    fn zero_and_non_finite() {
        assert_eq!(format_significant(0.0, 6), "0");
        assert_eq!(format_significant(f64::INFINITY, 6), "inf");
    }
}
