// Fixed-width field formatting for the status line.

use serde::Deserialize;

pub const BPS_SUFFIX: &str = "b";
pub const KIBPS_SUFFIX: &str = "kb";
pub const MIBPS_SUFFIX: &str = "mb";

/// Rates at or above this are not rendered (more than 999 MiB/s).
const RATE_LIMIT: i64 = 1000 * 1024 * 1024;
const MIB_THRESHOLD: i64 = 1000 * 1024;
const KIB_THRESHOLD: i64 = 1000;

/// Units in order of preference, with their divisors.
const UNITS: [(f64, &str); 3] = [
    (1.0, BPS_SUFFIX),
    (1024.0, KIBPS_SUFFIX),
    (1024.0 * 1024.0, MIBPS_SUFFIX),
];

/// Format a byte rate as `label + number + unit`.
///
/// With the default empty `float_separator` the number always occupies three
/// characters, so the field does not jitter as the rate changes. The width
/// branch is picked on the value as it will be printed: a value that rounds
/// up to 1000 moves to the next unit. A negative rate (counter reset) renders
/// as `label + " ERR"`, an over-range rate as `label + "ERR"`.
pub fn format_rate(label: &str, rate: i64, float_separator: &str) -> String {
    if rate < 0 {
        return format!("{label} ERR");
    }
    if rate >= RATE_LIMIT {
        return format!("{label}ERR");
    }

    let first = if rate >= MIB_THRESHOLD {
        2
    } else if rate >= KIB_THRESHOLD {
        1
    } else {
        0
    };
    for (divisor, suffix) in &UNITS[first..] {
        if let Some(number) = fixed_width(rate as f64 / divisor) {
            return format!("{label}{}{suffix}", number.replacen('.', float_separator, 1));
        }
    }
    format!("{label}ERR")
}

/// ` 9.9`, `99.9` or `999`; None when the value rounds to 1000 or more.
fn fixed_width(value: f64) -> Option<String> {
    let tenths = (value * 10.0).round();
    if tenths < 100.0 {
        Some(format!(" {:3.1}", tenths / 10.0))
    } else if tenths < 1000.0 {
        Some(format!("{:4.1}", tenths / 10.0))
    } else {
        let whole = value.round();
        (whole < 1000.0).then(|| format!("{whole:3.0}"))
    }
}

/// Format `label` followed by a right-aligned three-digit percentage.
pub fn format_percentage(label: &str, percentage: i64) -> String {
    format!("{label}{percentage:3}")
}

/// Severity of a percentage field, used to pick a highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Normal,
    Elevated,
    Critical,
}

/// Level for a usage percentage (CPU, memory): high is bad.
pub fn usage_level(percentage: i64) -> Level {
    if percentage >= 100 {
        Level::Critical
    } else if percentage >= 70 {
        Level::Elevated
    } else {
        Level::Normal
    }
}

/// Level for a battery charge percentage: low is bad.
pub fn battery_level(percentage: i64) -> Level {
    if percentage <= 5 {
        Level::Critical
    } else if percentage <= 10 {
        Level::Elevated
    } else {
        Level::Normal
    }
}

/// How a field is decorated according to its [`Level`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    /// Passthrough; every level renders identically.
    #[default]
    None,
    /// dwm statuscolors patch: `\x03` / `\x04` select a colour scheme, `\x01` resets.
    StatusColors,
}

impl Highlight {
    pub fn paint(self, level: Level, text: String) -> String {
        match (self, level) {
            (Highlight::None, _) | (_, Level::Normal) => text,
            (Highlight::StatusColors, Level::Elevated) => format!("\x03{text}\x01"),
            (Highlight::StatusColors, Level::Critical) => format!("\x04{text}\x01"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric_part<'a>(out: &'a str, label: &str, suffix: &str) -> &'a str {
        out.strip_prefix(label)
            .and_then(|s| s.strip_suffix(suffix))
            .unwrap()
    }

    #[test]
    fn negative_rate_is_error_with_space() {
        assert_eq!(format_rate("RX ", -1, ""), "RX  ERR");
        assert_eq!(format_rate("TX ", i64::MIN, ""), "TX  ERR");
    }

    #[test]
    fn over_range_rate_is_error_without_space() {
        assert_eq!(format_rate("RX ", 1000 * 1024 * 1024, ""), "RX ERR");
        assert_eq!(format_rate("RX ", i64::MAX, ""), "RX ERR");
    }

    #[test]
    fn bytes_branch_keeps_value() {
        assert_eq!(format_rate("RX ", 0, ""), "RX  00b");
        assert_eq!(format_rate("RX ", 5, ""), "RX  50b");
        assert_eq!(format_rate("RX ", 42, ""), "RX 420b");
        assert_eq!(format_rate("RX ", 999, ""), "RX 999b");
    }

    #[test]
    fn kib_branch_divides_by_1024() {
        assert_eq!(format_rate("TX ", 1000, ""), "TX  10kb");
        assert_eq!(format_rate("TX ", 10 * 1024, ""), "TX 100kb");
        assert_eq!(format_rate("TX ", 512 * 1024, ""), "TX 512kb");
    }

    #[test]
    fn mib_branch_divides_by_1024_squared() {
        assert_eq!(format_rate("RX ", 1000 * 1024, ""), "RX  10mb");
        assert_eq!(format_rate("RX ", 25 * 1024 * 1024, ""), "RX 250mb");
        assert_eq!(format_rate("RX ", 300 * 1024 * 1024, ""), "RX 300mb");
    }

    #[test]
    fn float_separator_replaces_decimal_point() {
        assert_eq!(format_rate("RX ", 5, "."), "RX  5.0b");
        assert_eq!(format_rate("RX ", 1536, ","), "RX  1,5kb");
        // integer branch has no decimal point to replace
        assert_eq!(format_rate("RX ", 500, ","), "RX 500b");
    }

    #[test]
    fn numeric_width_is_constant_across_branches() {
        let cases = [
            (3, BPS_SUFFIX),
            (57, BPS_SUFFIX),
            (640, BPS_SUFFIX),
            (2048, KIBPS_SUFFIX),
            (40 * 1024, KIBPS_SUFFIX),
            (700 * 1024, KIBPS_SUFFIX),
            (2 * 1024 * 1024, MIBPS_SUFFIX),
            (64 * 1024 * 1024, MIBPS_SUFFIX),
            (900 * 1024 * 1024, MIBPS_SUFFIX),
        ];
        for (rate, suffix) in cases {
            let out = format_rate("RX ", rate, "");
            assert_eq!(numeric_part(&out, "RX ", suffix).len(), 3, "{out:?}");
        }
        assert_eq!(
            format_rate("RX ", 2048, "").len(),
            format_rate("RX ", 64 * 1024 * 1024, "").len()
        );
    }

    #[test]
    fn values_rounding_across_a_width_boundary_stay_three_wide() {
        // 9.95 KiB prints as 10.0, 99.95 KiB as 100
        assert_eq!(format_rate("RX ", 10189, ""), "RX 100kb");
        assert_eq!(format_rate("RX ", 102349, ""), "RX 100kb");
        // 999.6 KiB would print as 1000, so it moves up to MiB
        assert_eq!(format_rate("RX ", 1023600, ""), "RX  10mb");
        for rate in [10189, 10239, 102349, 102399, 1023488, 1023600, 1023999] {
            let out = format_rate("RX ", rate, "");
            let number = out
                .strip_prefix("RX ")
                .and_then(|s| s.strip_suffix(KIBPS_SUFFIX).or_else(|| s.strip_suffix(MIBPS_SUFFIX)))
                .unwrap();
            assert_eq!(number.len(), 3, "{out:?}");
        }
    }

    #[test]
    fn mib_value_rounding_to_1000_is_over_range() {
        assert_eq!(format_rate("TX ", 1000 * 1024 * 1024 - 1, ""), "TX ERR");
        assert_eq!(format_rate("TX ", 999 * 1024 * 1024, ""), "TX 999mb");
    }

    #[test]
    fn percentage_is_right_aligned_to_three() {
        assert_eq!(format_percentage("CPU", 5), "CPU  5");
        assert_eq!(format_percentage("MEM", 40), "MEM 40");
        assert_eq!(format_percentage("MEM", 100), "MEM100");
        assert_eq!(format_percentage("CPU", 250), "CPU250");
    }

    #[test]
    fn usage_levels() {
        assert_eq!(usage_level(0), Level::Normal);
        assert_eq!(usage_level(69), Level::Normal);
        assert_eq!(usage_level(70), Level::Elevated);
        assert_eq!(usage_level(99), Level::Elevated);
        assert_eq!(usage_level(100), Level::Critical);
    }

    #[test]
    fn battery_levels() {
        assert_eq!(battery_level(3), Level::Critical);
        assert_eq!(battery_level(5), Level::Critical);
        assert_eq!(battery_level(10), Level::Elevated);
        assert_eq!(battery_level(11), Level::Normal);
    }

    #[test]
    fn no_highlight_is_passthrough() {
        for level in [Level::Normal, Level::Elevated, Level::Critical] {
            assert_eq!(Highlight::None.paint(level, "CPU 80".into()), "CPU 80");
        }
    }

    #[test]
    fn statuscolors_wraps_non_normal_levels() {
        let h = Highlight::StatusColors;
        assert_eq!(h.paint(Level::Normal, "CPU 10".into()), "CPU 10");
        assert_eq!(h.paint(Level::Elevated, "CPU 80".into()), "\x03CPU 80\x01");
        assert_eq!(h.paint(Level::Critical, "CPU100".into()), "\x04CPU100\x01");
    }
}
