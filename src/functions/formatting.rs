use chrono::Local;

/// Format elapsed milliseconds as `mm:ss`.
/// Minutes are zero-padded but NOT wrapped at 60: a ticket that has been
/// waiting 125 minutes reads "125:03", so very old orders stay obvious.
#[inline]
pub fn format_elapsed(elapsed_ms: i64) -> String {
    let total_seconds = elapsed_ms.max(0) / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Wall-clock line for the display header.
pub fn clock_line() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed_zero_pads_both_fields() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(5 * 60_000 + 3_000), "05:03");
        assert_eq!(format_elapsed(59_000), "00:59");
    }

    #[test]
    fn test_format_elapsed_does_not_wrap_minutes() {
        assert_eq!(format_elapsed((125 * 60 + 3) * 1000), "125:03");
        assert_eq!(format_elapsed(90 * 60_000), "90:00");
    }

    #[test]
    fn test_format_elapsed_floors_subsecond_remainders() {
        assert_eq!(format_elapsed(999), "00:00");
        assert_eq!(format_elapsed(60_999), "01:00");
    }

    #[test]
    fn test_format_elapsed_clamps_clock_skew() {
        assert_eq!(format_elapsed(-5_000), "00:00");
    }
}
