//! Value coercion: lenient number parsing, display formatting, date normalization
//!
//! None of these functions fail. Unreadable input degrades to `0`, an empty
//! string, or a truncated copy of the input.

use std::sync::OnceLock;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::models::CellValue;

/// Parse a cell as a number, tolerating thousands separators and a trailing `%`
///
/// Returns 0 for empty cells, non-finite numbers and text without a numeric prefix.
pub fn parse_lenient_number(value: &CellValue) -> f64 {
    match value {
        CellValue::Number(n) if n.is_finite() => *n,
        CellValue::Number(_) => 0.0,
        CellValue::Text(s) => parse_lenient_str(s),
        CellValue::Empty => 0.0,
    }
}

/// String form of [`parse_lenient_number`]
pub fn parse_lenient_str(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    let cleaned = s.replace(',', "");
    let cleaned = cleaned.strip_suffix('%').unwrap_or(&cleaned);
    float_prefix(cleaned).unwrap_or(0.0)
}

/// Read the longest leading decimal literal, ignoring anything after it
///
/// `"12.5abc"` reads as 12.5, `"abc"` as `None`.
pub(crate) fn float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - end - 1;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Group thousands with `,` and keep at most `max_digits` fraction digits
///
/// Trailing fractional zeros are dropped. Non-finite input formats as `"0"`.
pub fn format_number(n: f64, max_digits: usize) -> String {
    if !n.is_finite() {
        return "0".to_string();
    }

    let fixed = format!("{:.*}", max_digits, n.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let sign = if n < 0.0 && !is_zero { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// Baht amount with up to two fraction digits, e.g. `฿1,234.5`
pub fn format_currency(n: f64) -> String {
    format!("฿{}", format_number(n, 2))
}

/// Percent display for a 0..1 fraction: `0.1234` becomes `12.34%`
pub fn format_fraction(n: f64) -> String {
    if !n.is_finite() {
        return "0.00%".to_string();
    }
    format!("{:.2}%", n * 100.0)
}

/// Percent display for a value that is already on the 0..100 scale: `12.5` becomes `12.5%`
///
/// Rate columns in the extracom sub-tool arrive pre-scaled; do not feed
/// fractions in here.
pub fn format_percent_value(n: f64) -> String {
    format!("{}%", format_number(n, 2))
}

/// ROI display: a missing ROI renders as an em dash, never as `0%`
pub fn format_roi(roi: Option<f64>) -> String {
    match roi {
        Some(r) => format_fraction(r),
        None => "—".to_string(),
    }
}

fn ymd_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})[-/](\d{1,2})[-/](\d{1,2})").expect("valid regex"))
}

/// Normalize a raw order timestamp to `YYYY-MM-DD`
///
/// A leading `YYYY-M-D` / `YYYY/M/D` is zero-padded straight from the digits,
/// so no timezone conversion can shift the day. Other shapes go through
/// calendar parsing in local time; anything unreadable returns its first ten
/// characters.
pub fn canonical_date(raw: &CellValue) -> String {
    let s = match raw {
        CellValue::Empty => return String::new(),
        CellValue::Number(n) if *n == 0.0 || !n.is_finite() => return String::new(),
        CellValue::Number(n) => {
            return epoch_millis_date(*n).unwrap_or_else(|| raw.as_text().chars().take(10).collect())
        }
        CellValue::Text(s) => s.trim(),
    };
    if s.is_empty() {
        return String::new();
    }

    if let Some(caps) = ymd_prefix().captures(s) {
        return format!("{}-{:0>2}-{:0>2}", &caps[1], &caps[2], &caps[3]);
    }

    if let Some(date) = parse_calendar_date(s) {
        return date.format("%Y-%m-%d").to_string();
    }

    s.chars().take(10).collect()
}

/// Numeric timestamps are read as milliseconds since the Unix epoch
fn epoch_millis_date(n: f64) -> Option<String> {
    let dt = DateTime::from_timestamp_millis(n as i64)?;
    Some(dt.with_timezone(&Local).format("%Y-%m-%d").to_string())
}

fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }

    const DATETIME_FORMATS: [&str; 4] = [
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
        "%d %b %Y %H:%M:%S",
        "%b %d %Y %H:%M:%S",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    const DATE_FORMATS: [&str; 6] = [
        "%m/%d/%Y", // 01/15/2024
        "%m-%d-%Y", // 01-15-2024
        "%m/%d/%y", // 01/15/24
        "%d %b %Y", // 15 Jan 2024
        "%b %d %Y", // Jan 15 2024
        "%B %d, %Y", // January 15, 2024
    ];
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    None
}
