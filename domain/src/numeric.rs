//! Numeric coercion for form values.
//!
//! Form fields arrive as strings. Totals treat anything that is not a usable
//! number as zero, while validators need to know *why* a value was rejected,
//! so both flavours live here.

use crate::error::NumericError;

/// Strip currency symbols, thousands separators, percent signs and whitespace
fn clean_number_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%') && !c.is_whitespace())
        .collect()
}

/// Parse a form value, reporting why it is not a usable number
pub fn try_parse_number(input: &str) -> Result<f64, NumericError> {
    let cleaned = clean_number_input(input);
    if cleaned.is_empty() {
        return Err(NumericError::Empty);
    }

    let value = cleaned
        .parse::<f64>()
        .map_err(|_| NumericError::Invalid(input.trim().to_string()))?;

    if !value.is_finite() {
        return Err(NumericError::NotFinite);
    }

    Ok(value)
}

/// Parse a form value, falling back to zero for empty or invalid input
pub fn parse_number(input: &str) -> f64 {
    try_parse_number(input).unwrap_or(0.0)
}

/// Parse a value that must not be negative, clamping it to zero
pub fn parse_non_negative(input: &str) -> f64 {
    parse_number(input).max(0.0)
}

/// Sum any number of form values with zero-defaulting
pub fn sum_fields<I, S>(fields: I) -> f64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields.into_iter().map(|f| parse_number(f.as_ref())).sum()
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Whether a value uses more than two decimal places
pub fn has_sub_cent_precision(value: f64) -> bool {
    ((value * 100.0).round() - value * 100.0).abs() > 1e-6
}

/// Format as currency with thousands separators, e.g. `$1,234.56` or `-$20.00`
pub fn format_currency(value: f64) -> String {
    format_currency_with_symbol(value, "$")
}

pub fn format_currency_with_symbol(value: f64, symbol: &str) -> String {
    let rounded = round_to_cents(value);
    let negative = rounded < 0.0;
    let fixed = format!("{:.2}", rounded.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}{}{}.{}", if negative { "-" } else { "" }, symbol, grouped, cents)
}

/// Format a percentage for display, e.g. `12.5%`
pub fn format_percent(value: f64) -> String {
    let rounded = round_to_cents(value);
    if rounded.fract() == 0.0 {
        format!("{:.0}%", rounded)
    } else {
        format!("{}%", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_strips_formatting() {
        assert_eq!(parse_number("$1,234.50"), 1234.5);
        assert_eq!(parse_number(" 80% "), 80.0);
        assert_eq!(parse_number("-25"), -25.0);
    }

    #[test]
    fn test_parse_number_defaults_to_zero() {
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("   "), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("NaN"), 0.0);
        assert_eq!(parse_number("inf"), 0.0);
    }

    #[test]
    fn test_try_parse_number_reports_reason() {
        assert_eq!(try_parse_number(""), Err(NumericError::Empty));
        assert_eq!(try_parse_number("$"), Err(NumericError::Empty));
        assert_eq!(try_parse_number("12a"), Err(NumericError::Invalid("12a".to_string())));
        assert_eq!(try_parse_number("NaN"), Err(NumericError::NotFinite));
        assert_eq!(try_parse_number("12.5"), Ok(12.5));
    }

    #[test]
    fn test_parse_non_negative() {
        assert_eq!(parse_non_negative("-3"), 0.0);
        assert_eq!(parse_non_negative("3"), 3.0);
    }

    #[test]
    fn test_sum_fields() {
        assert_eq!(sum_fields(["100", "", "x", "$50.25"]), 150.25);
        assert_eq!(sum_fields(Vec::<String>::new()), 0.0);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(333.333333), 333.33);
        assert_eq!(round_to_cents(0.005), 0.01);
    }

    #[test]
    fn test_sub_cent_precision() {
        assert!(!has_sub_cent_precision(10.5));
        assert!(!has_sub_cent_precision(10.25));
        assert!(has_sub_cent_precision(10.255));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(500.0), "$500.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(-20.0), "-$20.00");
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(50.0), "50%");
        assert_eq!(format_percent(33.333), "33.33%");
    }
}
