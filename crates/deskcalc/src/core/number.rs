//! Conversions between entered number text and `f64`
//!
//! Entry text is kept as typed ("5.", "0.50") so the user can keep editing
//! it. These helpers are the only place that text becomes a number or a
//! number becomes entry text again.

/// Reads entered text as a finite number.
///
/// Accepts literals as they appear mid-entry (`"5."`, `"-3"`, `"1e21"`).
/// Returns `None` for empty or sign-only text, the `inf`/`nan` words, and
/// anything that overflows to a non-finite value.
#[must_use]
pub fn parse_operand(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if !trimmed.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads entered text as a number, falling back to zero.
///
/// Used by the memory keys, which never refuse input.
#[must_use]
pub fn parse_or_zero(text: &str) -> f64 {
    parse_operand(text).unwrap_or(0.0)
}

/// Turns a result back into entry text.
///
/// Uses the shortest text that reads back as the same value. Magnitudes of
/// at least `1e21` or below `1e-6` switch to exponent form. Negative zero
/// becomes `"0"`.
#[must_use]
pub fn stringify(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}
