//! Number formatting for labels and editable fields.

/// Groups the integer digits of a number with commas.
///
/// Existing commas are stripped first, so the function is idempotent.
/// Only the integer part is grouped; a fractional part is kept verbatim.
/// Text that is not a number is returned with commas removed.
///
/// # Examples
///
/// ```
/// use mudmap_core::format::format_number_with_commas;
///
/// assert_eq!(format_number_with_commas("1000000"), "1,000,000");
/// assert_eq!(format_number_with_commas("1,000,000"), "1,000,000");
/// assert_eq!(format_number_with_commas("-2500.125"), "-2,500.125");
/// assert_eq!(format_number_with_commas(""), "");
/// ```
pub fn format_number_with_commas(text: &str) -> String {
    let stripped = parse_number_with_commas(text);
    let (sign, unsigned) = match stripped.strip_prefix(['-', '+']) {
        Some(rest) => (&stripped[..1], rest),
        None => ("", stripped.as_str()),
    };
    let (int_part, rest) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return stripped;
    }

    let mut grouped = String::with_capacity(stripped.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (index, digit) in int_part.chars().enumerate() {
        if index > 0 && (int_part.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push_str(rest);
    grouped
}

/// Removes thousands separators from user-entered text.
///
/// # Examples
///
/// ```
/// use mudmap_core::format::parse_number_with_commas;
///
/// assert_eq!(parse_number_with_commas("3,000,000"), "3000000");
/// ```
pub fn parse_number_with_commas(text: &str) -> String {
    text.replace(',', "")
}

/// Formats a currency amount as a compact axis label.
///
/// Values of a thousand or more get a `K`, `M` or `B` suffix with one
/// decimal; smaller values are rounded to whole dollars. Non-finite values
/// render as `$0`.
///
/// # Examples
///
/// ```
/// use mudmap_core::format::format_axis_label;
///
/// assert_eq!(format_axis_label(3_000_000.0), "$3.0M");
/// assert_eq!(format_axis_label(1_260_000_000.0), "$1.3B");
/// assert_eq!(format_axis_label(500_000.0), "$500.0K");
/// assert_eq!(format_axis_label(950.0), "$950");
/// ```
pub fn format_axis_label(value: f64) -> String {
    if !value.is_finite() {
        return "$0".to_string();
    }

    if value >= 1e9 {
        format!("${:.1}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.1}M", value / 1e6)
    } else if value >= 1e3 {
        format!("${:.1}K", value / 1e3)
    } else {
        format!("${value:.0}")
    }
}
