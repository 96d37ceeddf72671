//! Display formatting for the calculator readout
//!
//! A pure transform applied at render time. The entry text held by the
//! engine is never rewritten by it.

use super::number::parse_operand;

/// Magnitude at and above which the readout switches to scientific notation
pub const SCIENTIFIC_UPPER: f64 = 1e12;

/// Nonzero magnitude below which the readout switches to scientific notation
pub const SCIENTIFIC_LOWER: f64 = 1e-6;

/// Mantissa digits after the point in scientific notation
pub const EXPONENT_DIGITS: usize = 6;

/// Most fractional digits shown for a non-integer value
pub const MAX_FRACTION_DIGITS: usize = 10;

/// Formats entry text for the readout.
///
/// Text that is not a readable number (a lone `"-"` left by backspace, say)
/// is shown as-is.
#[must_use]
pub fn format_display(entry: &str) -> String {
    match parse_operand(entry) {
        Some(value) => format_value(value),
        None => entry.to_string(),
    }
}

/// Formats a finite value for the readout.
///
/// - `|v| >= 1e12`, or nonzero `|v| < 1e-6`: `1.234568e+12`
/// - whole numbers: `1,234`
/// - everything else: `1,234.5678`, rounded to 10 fractional digits
#[must_use]
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= SCIENTIFIC_UPPER || magnitude < SCIENTIFIC_LOWER {
        return to_exponential(value, EXPONENT_DIGITS);
    }
    if value.fract() == 0.0 {
        return group_thousands(&format!("{value:.0}"));
    }
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    group_thousands(trimmed)
}

/// Scientific notation with a signed exponent (`1.000000e-7`)
fn to_exponential(value: f64, digits: usize) -> String {
    let formatted = format!("{value:.digits$e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, magnitude) = exponent
                .strip_prefix('-')
                .map_or(("+", exponent), |rest| ("-", rest));
            format!("{mantissa}e{sign}{magnitude}")
        }
        None => formatted,
    }
}

/// Inserts `,` between thousands groups of the integer part
fn group_thousands(plain: &str) -> String {
    let (sign, unsigned) = plain
        .strip_prefix('-')
        .map_or(("", plain), |rest| ("-", rest));
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(plain.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
