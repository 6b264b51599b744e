//! Display helpers shared by the views and the reducer.

use chrono::NaiveDate;

/// Converts an ISO `YYYY-MM-DD` string to US `MM/DD/YYYY`.
///
/// Empty input yields an empty string. Input missing any of the three
/// segments is returned unchanged.
///
/// # Examples
///
/// ```
/// use intake_core::format::iso_to_us;
///
/// assert_eq!(iso_to_us("2025-01-31"), "01/31/2025");
/// assert_eq!(iso_to_us("2025-01"), "2025-01");
/// assert_eq!(iso_to_us(""), "");
/// ```
pub fn iso_to_us(iso: &str) -> String {
    if iso.is_empty() {
        return String::new();
    }
    let mut parts = iso.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d)) if !y.is_empty() && !m.is_empty() && !d.is_empty() => {
            format!("{m}/{d}/{y}")
        }
        _ => iso.to_string(),
    }
}

/// Formats a stored calendar date the way the review page shows it.
pub fn us_date(date: &NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Formats a byte count using B/KB/MB/GB with one decimal above bytes.
///
/// # Examples
///
/// ```
/// use intake_core::format::format_bytes;
///
/// assert_eq!(format_bytes(0), "0B");
/// assert_eq!(format_bytes(1024), "1.0KB");
/// assert_eq!(format_bytes(5 * 1024 * 1024), "5.0MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let precision = if unit == 0 { 0 } else { 1 };
    format!("{value:.precision$}{}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // iso_to_us tests
    // =========================================================================

    #[test]
    fn iso_to_us_reorders_segments() {
        assert_eq!(iso_to_us("2025-01-31"), "01/31/2025");
    }

    #[test]
    fn iso_to_us_returns_malformed_input_unchanged() {
        assert_eq!(iso_to_us("2025-01"), "2025-01");
        assert_eq!(iso_to_us("20250131"), "20250131");
        assert_eq!(iso_to_us("2025--31"), "2025--31");
    }

    #[test]
    fn iso_to_us_empty_is_empty() {
        assert_eq!(iso_to_us(""), "");
    }

    #[test]
    fn us_date_pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        assert_eq!(us_date(&date), "03/07/2024");
    }

    // =========================================================================
    // format_bytes tests
    // =========================================================================

    #[test]
    fn format_bytes_keeps_whole_bytes_below_one_kilobyte() {
        assert_eq!(format_bytes(0), "0B");
        assert_eq!(format_bytes(1023), "1023B");
    }

    #[test]
    fn format_bytes_uses_one_decimal_for_larger_units() {
        assert_eq!(format_bytes(1024), "1.0KB");
        assert_eq!(format_bytes(1536), "1.5KB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0GB");
    }

    #[test]
    fn format_bytes_stops_at_gigabytes() {
        assert_eq!(format_bytes(2048 * 1024 * 1024 * 1024), "2048.0GB");
    }
}
