//! Display formatting and field parsing.
//!
//! These are projections only. The one exception is `round_input_value`:
//! inputs written by paste or the picker are stored as their field shows them.

use crate::error::RampError;

/// Parses a numeric field. Surrounding whitespace is ignored; non-finite
/// values are rejected.
pub fn parse_number(text: &str) -> Result<f64, RampError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RampError::InvalidNumber {
            text: text.to_string(),
        })
}

/// Two decimals, used for L*, a*, b*, target lightness, and fractions.
pub fn format_fixed2(value: f64) -> String {
    format!("{value:.2}")
}

/// Formats a clipped output channel according to its range.
///
/// - integral range other than 1 (e.g. 31, 255): nearest integer, ties to even
/// - range of exactly 1: three decimals
/// - anything else (e.g. 0.8): three significant digits
pub fn format_output_channel(value: f64, range: f64) -> String {
    if range == 1.0 {
        format!("{value:.3}")
    } else if range.fract() == 0.0 {
        format!("{}", value.round_ties_even() as i64)
    } else {
        format_significant(value, 3)
    }
}

/// Formats a value written into an input field by paste or the picker.
pub fn format_input_value(value: f64, range: f64) -> String {
    if range > 10.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.3}")
    }
}

/// `value` as `format_input_value` shows it.
pub fn round_input_value(value: f64, range: f64) -> f64 {
    format_input_value(value, range).parse().unwrap_or(value)
}

/// `digits` significant digits with trailing zeros removed, switching to
/// exponent notation when the exponent is below -4 or at least `digits`.
pub fn format_significant(value: f64, digits: usize) -> String {
    let digits = digits.max(1);
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let sci = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return sci;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            strip_trailing_zeros(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        strip_trailing_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_padded_numbers() {
        assert_eq!(parse_number(" 38.05 "), Ok(38.05));
        assert_eq!(parse_number("-4"), Ok(-4.0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            parse_number("12a"),
            Err(RampError::InvalidNumber { .. })
        ));
        assert!(parse_number("").is_err());
        assert!(parse_number("NaN").is_err());
        assert!(parse_number("inf").is_err());
    }

    #[test]
    fn integral_ranges_round_to_integers() {
        assert_eq!(format_output_channel(7.412897, 63.0), "7");
        assert_eq!(format_output_channel(15.161039, 31.0), "15");
        assert_eq!(format_output_channel(235.577, 255.0), "236");
        assert_eq!(format_output_channel(0.0, 255.0), "0");
        // Ties go to even.
        assert_eq!(format_output_channel(2.5, 31.0), "2");
        assert_eq!(format_output_channel(3.5, 31.0), "4");
    }

    #[test]
    fn unit_range_uses_three_decimals() {
        assert_eq!(format_output_channel(0.455870, 1.0), "0.456");
        assert_eq!(format_output_channel(0.0, 1.0), "0.000");
        assert_eq!(format_output_channel(1.0, 1.0), "1.000");
    }

    #[test]
    fn fractional_ranges_use_significant_digits() {
        assert_eq!(format_output_channel(0.364696, 0.8), "0.365");
        assert_eq!(format_output_channel(0.739066, 0.8), "0.739");
        assert_eq!(format_output_channel(0.5, 0.8), "0.5");
        assert_eq!(format_output_channel(0.0, 0.8), "0");
        assert_eq!(format_output_channel(31.456, 31.5), "31.5");
    }

    #[test]
    fn significant_digits_switch_to_exponent() {
        assert_eq!(format_significant(1234.0, 3), "1.23e+03");
        assert_eq!(format_significant(0.00001234, 3), "1.23e-05");
        assert_eq!(format_significant(0.0001234, 3), "0.000123");
        assert_eq!(format_significant(123.4, 3), "123");
        assert_eq!(format_significant(999.9, 3), "1e+03");
        assert_eq!(format_significant(-0.5, 3), "-0.5");
    }

    #[test]
    fn input_values_follow_range_precision() {
        assert_eq!(format_input_value(0.25, 1.0), "0.250");
        assert_eq!(format_input_value(120.0, 255.0), "120.0");
        assert_eq!(format_input_value(3.0, 7.0), "3.000");
    }

    #[test]
    fn rounded_input_matches_field_text() {
        assert_eq!(round_input_value(12.3456, 255.0), 12.3);
        assert_eq!(round_input_value(0.12345, 1.0), 0.123);
        assert_eq!(round_input_value(7.00049, 8.0), 7.0);
        assert_eq!(
            format_input_value(round_input_value(12.3456, 255.0), 255.0),
            "12.3"
        );
    }

    #[test]
    fn fixed2() {
        assert_eq!(format_fixed2(38.05), "38.05");
        assert_eq!(format_fixed2(0.33), "0.33");
    }
}
