//! Value formatting for display entries.
//!
//! Each helper returns `None` when the raw value cannot be interpreted; the
//! caller then shows the raw string unchanged.

use chrono::{DateTime, NaiveDate};

/// Unit suffix appended to area values
pub const AREA_UNIT: &str = " km sq.";

const DISPLAY_DATE_FORMAT: &str = "%B %-d, %Y";

/// Truncate a decimal toward zero and group its digits by thousands.
///
/// `"1010407.87"` becomes `"1,010,407"`.
pub fn group_thousands(raw: &str) -> Option<String> {
    let (negative, digits) = integer_digits(raw.trim())?;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    Some(out)
}

/// Grouped integer with the area unit appended
pub fn format_area(raw: &str) -> Option<String> {
    group_thousands(raw).map(|grouped| format!("{grouped}{AREA_UNIT}"))
}

/// Render an ISO-8601 timestamp or calendar date as `"Month D, YYYY"`
pub fn format_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()?;
    Some(date.format(DISPLAY_DATE_FORMAT).to_string())
}

/// Longest integer part rendered; larger exponents pass through unformatted
const MAX_INTEGER_DIGITS: i64 = 400;

/// Sign and integer digits of `[+-]digits[.digits][e[+-]digits]`, with no
/// leading zeros. Works on the digit string so long values keep precision.
fn integer_digits(raw: &str) -> Option<(bool, String)> {
    let (negative, unsigned) = match raw.as_bytes().first()? {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    // Position of the decimal point once the exponent is applied.
    let point = (int_part.len() as i64).checked_add(exponent)?;
    if point > MAX_INTEGER_DIGITS {
        return None;
    }
    let width = usize::try_from(point.max(0)).ok()?;
    let mut shifted: String = int_part.chars().chain(frac_part.chars()).take(width).collect();
    while shifted.len() < width {
        shifted.push('0');
    }

    let trimmed = shifted.trim_start_matches('0');
    let digits = if trimmed.is_empty() { "0" } else { trimmed };
    Some((negative && digits != "0", digits.to_string()))
}
