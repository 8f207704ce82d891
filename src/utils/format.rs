//! Formatting utilities for file sizes and dates.

use chrono::{DateTime, Utc};

use crate::config::BYTES_PER_KB;

/// Unit labels, each 1024 times the previous.
const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count for display (e.g., "0 Bytes", "2 KB", "1.5 MB").
///
/// Uses 1024-based units, rounds to two decimals and drops trailing zeros.
/// Sizes past the largest unit stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return format!("0 {}", SIZE_UNITS[0]);
    }

    let step = BYTES_PER_KB as f64;
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= step && unit < SIZE_UNITS.len() - 1 {
        value /= step;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// Format a timestamp as an ISO date (YYYY-MM-DD).
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1000), "1000 Bytes");
        assert_eq!(format_file_size(2048), "2 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_572_864), "1.5 MB");
        assert_eq!(format_file_size(15 * 1024 * 1024 * 1024), "15 GB");
    }

    #[test]
    fn test_format_file_size_rounding() {
        // 1.3333 KB
        assert_eq!(format_file_size(1365), "1.33 KB");
        // Beyond GB stays in GB
        assert_eq!(format_file_size(2 * 1024 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn test_format_date() {
        let ts = DateTime::from_timestamp(1704067200, 0).unwrap();
        assert_eq!(format_date(&ts), "2024-01-01");
        let epoch = DateTime::from_timestamp(0, 0).unwrap();
        assert_eq!(format_date(&epoch), "1970-01-01");
    }
}
