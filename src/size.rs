//! Human-readable byte counts for card labels.

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const BASE: f64 = 1024.0;

/// Format a byte count as `"<value> <unit>"`.
///
/// The unit is the largest of Bytes/KB/MB/GB for which the scaled value is at
/// least 1 (base 1024). The value is rounded to two decimals and trailing
/// zeros are dropped, so `1536` is `"1.5 KB"` and `1024` is `"1 KB"`.
///
/// ```
/// # use pdf_gallery::size::format_size;
/// assert_eq!(format_size(0), "0 Bytes");
/// assert_eq!(format_size(1200), "1.17 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    let mut scaled = bytes as f64;
    while scaled >= BASE && exponent < UNITS.len() - 1 {
        scaled /= BASE;
        exponent += 1;
    }

    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", trim_decimals(rounded), UNITS[exponent])
}

/// Render with at most two decimals, dropping trailing zeros.
fn trim_decimals(value: f64) -> String {
    let fixed = format!("{value:.2}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_bytes() {
        assert_eq!(format_size(0), "0 Bytes");
    }

    #[test]
    fn small_counts_stay_in_bytes() {
        assert_eq!(format_size(1), "1 Bytes");
        assert_eq!(format_size(1023), "1023 Bytes");
    }

    #[test]
    fn exact_kilobyte() {
        assert_eq!(format_size(1024), "1 KB");
    }

    #[test]
    fn fractional_kilobytes() {
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1200), "1.17 KB");
    }

    #[test]
    fn megabytes_and_gigabytes() {
        assert_eq!(format_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_size(1_073_741_824), "1 GB");
    }

    #[test]
    fn caps_at_gigabytes() {
        assert_eq!(format_size(2048 * 1_073_741_824), "2048 GB");
    }

    #[test]
    fn rounding_carries_to_whole_number() {
        // 1023.999 KB rounds up to "1024 KB", not to the next unit
        assert_eq!(format_size(1024 * 1024 - 1), "1024 KB");
    }
}
