//! Lenient numeric coercion for user-entered text.
//!
//! Layer fields are edited live, so they routinely hold incomplete or
//! malformed text (`""`, `"1e"`, `"abc"`, `"12abc"`). Nothing in the layout
//! pipeline treats that as an error: every field is coerced with
//! [`parse_number`], which reads the longest leading decimal literal and
//! falls back to `0.0` when there is none.
//!
//! Currency fields may additionally carry thousands separators, which
//! [`parse_amount`] strips before coercing.

/// Parses the longest leading decimal literal of `text`.
///
/// Leading whitespace is skipped. The literal is an optional sign, digits
/// with an optional fractional part, and an optional exponent. Anything
/// after the literal is ignored. Returns `0.0` when no literal is present
/// or the value is not finite.
///
/// # Examples
///
/// ```
/// use mudmap_core::number::parse_number;
///
/// assert_eq!(parse_number("42"), 42.0);
/// assert_eq!(parse_number("  -1.5e2 "), -150.0);
/// assert_eq!(parse_number("12abc"), 12.0);
/// assert_eq!(parse_number("abc"), 0.0);
/// assert_eq!(parse_number(""), 0.0);
/// ```
pub fn parse_number(text: &str) -> f64 {
    let text = text.trim_start();
    let literal = &text[..leading_literal_len(text)];
    match literal.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parses a currency amount, stripping thousands separators first.
///
/// # Examples
///
/// ```
/// use mudmap_core::number::parse_amount;
///
/// assert_eq!(parse_amount("3,000,000"), 3_000_000.0);
/// assert_eq!(parse_amount("1,5"), 15.0);
/// ```
pub fn parse_amount(text: &str) -> f64 {
    if text.contains(',') {
        parse_number(&text.replace(',', ""))
    } else {
        parse_number(text)
    }
}

/// Parses the leading literal, returning `None` instead of `0.0` when the
/// text holds no number at all.
///
/// Used where a missing value must stay distinguishable from zero, such as
/// tabular exports.
pub fn try_parse_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let len = leading_literal_len(text);
    if len == 0 {
        return None;
    }
    text[..len].parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Returns the byte length of the decimal literal at the start of `text`.
///
/// A literal needs at least one mantissa digit. An exponent marker is only
/// consumed when digits follow it, so `"1e"` yields `"1"`.
fn leading_literal_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let mut mantissa_digits = pos - int_start;

    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if mantissa_digits + frac_digits > 0 {
            pos = frac_end;
            mantissa_digits += frac_digits;
        }
    }

    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        if matches!(bytes.get(exp_pos), Some(b'+' | b'-')) {
            exp_pos += 1;
        }
        let exp_start = exp_pos;
        while bytes.get(exp_pos).is_some_and(u8::is_ascii_digit) {
            exp_pos += 1;
        }
        if exp_pos > exp_start {
            pos = exp_pos;
        }
    }

    pos
}
