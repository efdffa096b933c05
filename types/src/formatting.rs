//! Centralized number formatting utilities.
//!
//! All numeric report formatting goes through this module to keep the text
//! report consistent, and to support European-style number formatting
//! (swapping `.` and `,`).

/// Apply European number format by swapping `.` and `,` in a formatted string.
fn europeanize(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '.' => result.push(','),
            ',' => result.push('.'),
            _ => result.push(c),
        }
    }
    result
}

/// Apply European formatting conditionally.
#[inline]
fn maybe_eu(s: String, european: bool) -> String {
    if european { europeanize(&s) } else { s }
}

/// Format a decimal number with the specified precision.
///
/// # Examples
/// ```
/// use kolstat_types::formatting::format_decimal;
/// assert_eq!(format_decimal(3.5, 1, false), "3.5");
/// assert_eq!(format_decimal(3.5, 1, true), "3,5");
/// assert_eq!(format_decimal(1.234, 2, false), "1.23");
/// ```
pub fn format_decimal(n: f64, precision: usize, european: bool) -> String {
    maybe_eu(format!("{:.prec$}", n, prec = precision), european)
}

/// Format an average with its observed bounds as `avg [min .. max]`.
///
/// # Examples
/// ```
/// use kolstat_types::formatting::format_avg_range;
/// assert_eq!(format_avg_range(12.34, 10.0, 14.5, false), "12.3 [10.0 .. 14.5]");
/// assert_eq!(format_avg_range(12.34, 10.0, 14.5, true), "12,3 [10,0 .. 14,5]");
/// ```
pub fn format_avg_range(avg: f64, min: f64, max: f64, european: bool) -> String {
    format!(
        "{} [{} .. {}]",
        format_decimal(avg, 1, european),
        format_decimal(min, 1, european),
        format_decimal(max, 1, european)
    )
}

/// Format a drop rate in `[0, 1]` as a percentage.
///
/// A certain drop is shown without decimals, an unknown rate as `?%`.
///
/// # Examples
/// ```
/// use kolstat_types::formatting::format_rate;
/// assert_eq!(format_rate(Some(1.0), false), "100%");
/// assert_eq!(format_rate(Some(0.123), false), "12.3%");
/// assert_eq!(format_rate(Some(0.123), true), "12,3%");
/// assert_eq!(format_rate(None, false), "?%");
/// ```
pub fn format_rate(rate: Option<f64>, european: bool) -> String {
    match rate {
        None => "?%".to_string(),
        Some(r) if r == 1.0 => "100%".to_string(),
        Some(r) => maybe_eu(format!("{:.1}%", r * 100.0), european),
    }
}

/// Join samples with `;` at the given precision.
///
/// # Examples
/// ```
/// use kolstat_types::formatting::format_samples;
/// assert_eq!(format_samples(&[1.0, 2.5], 2, false), "1.00;2.50");
/// assert_eq!(format_samples(&[], 2, false), "");
/// ```
pub fn format_samples(samples: &[f64], precision: usize, european: bool) -> String {
    samples
        .iter()
        .map(|s| format_decimal(*s, precision, european))
        .collect::<Vec<_>>()
        .join(";")
}

/// Format an optional integer bound, `?` when unknown.
///
/// # Examples
/// ```
/// use kolstat_types::formatting::format_bound;
/// assert_eq!(format_bound(Some(42)), "42");
/// assert_eq!(format_bound(None), "?");
/// ```
pub fn format_bound(n: Option<i64>) -> String {
    n.map_or_else(|| "?".to_string(), |n| n.to_string())
}

/// Pluralize a count with a noun: `1 drop`, `2 drops`.
///
/// # Examples
/// ```
/// use kolstat_types::formatting::format_count;
/// assert_eq!(format_count(1, "drop"), "1 drop");
/// assert_eq!(format_count(0, "drop"), "0 drops");
/// ```
pub fn format_count(n: u32, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}
