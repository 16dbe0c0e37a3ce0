//! FILENAME: core/table-render/src/format.rs
//! PURPOSE: Locale-aware numeric formatting for table cells.
//! CONTEXT: Converts raw measures to display strings according to the
//! row's NumberFormatSpec (en-US digit grouping, fixed currency). A
//! non-finite input yields None so the caller substitutes the sentinel
//! instead of ever printing a NaN.

use pivot_engine::{FormatStyle, NumberFormatSpec};

/// Format a measure for display. `None` means the value has no numeric
/// representation (NaN/infinite) and must render as the sentinel.
pub fn format_value(value: f64, spec: &NumberFormatSpec) -> Option<String> {
    if !value.is_finite() {
        return None;
    }

    let formatted = match spec.style {
        FormatStyle::Currency => {
            let digits = format_fraction(value.abs(), spec.min_fraction_digits, spec.max_fraction_digits);
            let grouped = add_thousands_separator(&digits);
            let symbol = currency_symbol(&spec.currency);
            if value < 0.0 {
                format!("-{}{}", symbol, grouped)
            } else {
                format!("{}{}", symbol, grouped)
            }
        }
        FormatStyle::Decimal => {
            let digits = format_fraction(value, spec.min_fraction_digits, spec.max_fraction_digits);
            add_thousands_separator(&digits)
        }
        FormatStyle::Percent => {
            let digits = format_fraction(
                value * 100.0,
                spec.min_fraction_digits,
                spec.max_fraction_digits,
            );
            format!("{}%", add_thousands_separator(&digits))
        }
    };

    Some(formatted)
}

/// Rounds to `max` fraction digits, then trims trailing zeros down to
/// `min` digits (dropping the decimal point when nothing remains).
fn format_fraction(value: f64, min: u8, max: u8) -> String {
    let max = max.max(min);
    let mut s = format!("{:.prec$}", value, prec = max as usize);

    if max > min {
        if let Some(dot) = s.find('.') {
            let keep = if min == 0 { dot } else { dot + 1 + min as usize };
            while s.len() > keep && s.ends_with('0') {
                s.pop();
            }
            if s.ends_with('.') {
                s.pop();
            }
        }
    }

    s
}

/// Add thousands separators to a plain numeric string.
fn add_thousands_separator(s: &str) -> String {
    let mut parts = s.split('.');
    let integer_part = parts.next().unwrap_or("");
    let decimal_part = parts.next();

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if negative {
        result = format!("-{}", result);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

/// Display symbol for an ISO 4217 currency code. Unknown codes fall back
/// to the code itself followed by a space.
fn currency_symbol(code: &str) -> String {
    match code {
        "USD" => "$".to_string(),
        "EUR" => "\u{20ac}".to_string(),
        "GBP" => "\u{a3}".to_string(),
        "JPY" => "\u{a5}".to_string(),
        _ => format!("{} ", code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn currency(digits: u8) -> NumberFormatSpec {
        NumberFormatSpec {
            style: FormatStyle::Currency,
            currency: "USD".to_string(),
            min_fraction_digits: digits,
            max_fraction_digits: digits,
        }
    }

    #[test]
    fn currency_groups_and_pads() {
        assert_eq!(format_value(1234567.5, &currency(2)).unwrap(), "$1,234,567.50");
        assert_eq!(format_value(0.0, &currency(2)).unwrap(), "$0.00");
    }

    #[test]
    fn currency_negative_sign_precedes_symbol() {
        assert_eq!(format_value(-1234.0, &currency(0)).unwrap(), "-$1,234");
    }

    #[test]
    fn nan_and_infinity_have_no_representation() {
        assert_eq!(format_value(f64::NAN, &currency(2)), None);
        assert_eq!(format_value(f64::INFINITY, &currency(2)), None);
    }

    #[test]
    fn decimal_respects_fraction_digits() {
        let spec = NumberFormatSpec {
            style: FormatStyle::Decimal,
            currency: "USD".to_string(),
            min_fraction_digits: 1,
            max_fraction_digits: 3,
        };
        assert_eq!(format_value(1.25, &spec).unwrap(), "1.25");
        assert_eq!(format_value(1.2500, &spec).unwrap(), "1.25");
        assert_eq!(format_value(1.0, &spec).unwrap(), "1.0");
        assert_eq!(format_value(9876.54321, &spec).unwrap(), "9,876.543");
    }

    #[test]
    fn percent_scales_by_hundred() {
        let spec = NumberFormatSpec {
            style: FormatStyle::Percent,
            currency: "USD".to_string(),
            min_fraction_digits: 1,
            max_fraction_digits: 1,
        };
        assert_eq!(format_value(0.125, &spec).unwrap(), "12.5%");
    }

    #[test]
    fn unknown_currency_code_falls_back_to_code() {
        let mut spec = currency(0);
        spec.currency = "SEK".to_string();
        assert_eq!(format_value(10.0, &spec).unwrap(), "SEK 10");
    }
}
