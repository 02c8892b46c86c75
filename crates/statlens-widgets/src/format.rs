//! Value and timestamp formatting for chart labels.

use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Number rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Separator between groups of three integer digits
    pub group_separator: char,
    /// Separator between integer and fractional digits
    pub decimal_separator: char,
    /// Significant digits kept for fractional values
    pub significant_digits: u8,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            group_separator: ',',
            decimal_separator: '.',
            significant_digits: 6,
        }
    }
}

/// Header timestamp patterns (chrono strftime syntax).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormats {
    /// Pattern for timestamps with a time of day
    pub long: String,
    /// Pattern for date-only timestamps
    pub short: String,
    /// Offset from UTC used to display times, in minutes
    pub utc_offset_minutes: i32,
}

impl Default for DateFormats {
    fn default() -> Self {
        Self {
            long: "%a, %b %-d %H:%M".to_string(),
            short: "%a, %b %-d".to_string(),
            utc_offset_minutes: 0,
        }
    }
}

impl DateFormats {
    /// Display offset, `None` when `utc_offset_minutes` is out of range.
    #[must_use]
    pub fn offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
    }
}

/// Format a chart value: grouped integer digits, at most
/// `significant_digits` significant digits for fractional values, trailing
/// zeros trimmed, never exponent notation.
#[must_use]
pub fn format_value(value: f64, format: &NumberFormat) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    // Decimal exponent of the leading significant digit.
    let leading = if magnitude > 0.0 {
        magnitude.log10().floor() as i32
    } else {
        0
    };
    let decimals = (i32::from(format.significant_digits) - 1 - leading).max(0) as usize;

    let mut digits = format!("{magnitude:.decimals$}");
    if digits.contains('.') {
        let trimmed = digits.trim_end_matches('0').trim_end_matches('.').len();
        digits.truncate(trimmed);
    }

    let (integer, fraction) = digits
        .split_once('.')
        .map_or((digits.as_str(), None), |(i, f)| (i, Some(f)));

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if value < 0.0 && digits != "0" {
        out.push('-');
    }
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(format.group_separator);
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push(format.decimal_separator);
        out.push_str(fraction);
    }
    out
}

/// Whether a timestamp carries a time of day (non-zero UTC hour or minute).
#[must_use]
pub fn has_time_of_day(timestamp_ms: i64) -> bool {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .is_some_and(|t| t.hour() != 0 || t.minute() != 0)
}

/// Format a header timestamp.
///
/// Timestamps with a UTC time of day use the long pattern in the configured
/// offset. Date-only timestamps use the short pattern on their UTC date, so
/// daily points never shift to a neighbouring day. Timestamps out of range
/// and invalid patterns give an empty string.
#[must_use]
pub fn format_timestamp(timestamp_ms: i64, formats: &DateFormats) -> String {
    let Some(utc) = DateTime::<Utc>::from_timestamp_millis(timestamp_ms) else {
        tracing::warn!(timestamp_ms, "timestamp out of range");
        return String::new();
    };

    let mut out = String::new();
    let written = if has_time_of_day(timestamp_ms) {
        let offset = formats.offset().unwrap_or_else(|| Utc.fix());
        write!(out, "{}", utc.with_timezone(&offset).format(&formats.long))
    } else {
        write!(out, "{}", utc.date_naive().format(&formats.short))
    };

    if written.is_err() {
        tracing::warn!(timestamp_ms, "invalid date pattern");
        out.clear();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const JAN_15_2024: i64 = 1_705_276_800_000;

    fn fmt(value: f64) -> String {
        format_value(value, &NumberFormat::default())
    }

    #[test]
    fn test_format_integers_grouped() {
        assert_eq!(fmt(0.0), "0");
        assert_eq!(fmt(7.0), "7");
        assert_eq!(fmt(999.0), "999");
        assert_eq!(fmt(1000.0), "1,000");
        assert_eq!(fmt(2500.0), "2,500");
        assert_eq!(fmt(1_234_567.0), "1,234,567");
        assert_eq!(fmt(-1_234_567.0), "-1,234,567");
    }

    #[test]
    fn test_format_fractions_trimmed() {
        assert_eq!(fmt(0.5), "0.5");
        assert_eq!(fmt(1.25), "1.25");
        assert_eq!(fmt(1234.5678), "1,234.57");
        assert_eq!(fmt(-0.125), "-0.125");
    }

    #[test]
    fn test_format_rounding_carries() {
        assert_eq!(fmt(999.9999999), "1,000");
    }

    #[test]
    fn test_format_no_negative_zero() {
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(-0.000_000_000_1), "-0.0000000001");
    }

    #[test]
    fn test_format_small_fractions_keep_significant_digits() {
        assert_eq!(fmt(0.000_123_456), "0.000123456");
        assert_eq!(fmt(0.000_123_456_7), "0.000123457");
        assert_eq!(fmt(0.000_000_1), "0.0000001");
        assert_eq!(fmt(-0.05), "-0.05");
        assert_eq!(fmt(0.999_999_9), "1");
    }

    #[test]
    fn test_format_large_values_not_exponent() {
        assert_eq!(fmt(12_345_678_901.0), "12,345,678,901");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(fmt(f64::NAN), "NaN");
        assert_eq!(fmt(f64::INFINITY), "inf");
    }

    #[test]
    fn test_format_custom_separators() {
        let format = NumberFormat {
            group_separator: ' ',
            decimal_separator: ',',
            significant_digits: 6,
        };
        assert_eq!(format_value(1234.5, &format), "1 234,5");
    }

    #[test]
    fn test_has_time_of_day() {
        assert!(!has_time_of_day(JAN_15_2024));
        assert!(has_time_of_day(JAN_15_2024 + 60_000));
        assert!(has_time_of_day(JAN_15_2024 + 3_600_000));
        // Seconds alone do not count as a time of day.
        assert!(!has_time_of_day(JAN_15_2024 + 30_000));
    }

    #[test]
    fn test_format_timestamp_short() {
        let text = format_timestamp(JAN_15_2024, &DateFormats::default());
        assert_eq!(text, "Mon, Jan 15");
    }

    #[test]
    fn test_format_timestamp_long() {
        let ts = JAN_15_2024 + (13 * 60 + 45) * 60_000;
        let text = format_timestamp(ts, &DateFormats::default());
        assert_eq!(text, "Mon, Jan 15 13:45");
    }

    #[test]
    fn test_format_timestamp_long_uses_offset() {
        let formats = DateFormats {
            utc_offset_minutes: 180,
            ..DateFormats::default()
        };
        let ts = JAN_15_2024 + 22 * 3_600_000;
        assert_eq!(format_timestamp(ts, &formats), "Tue, Jan 16 01:00");
    }

    #[test]
    fn test_format_timestamp_short_keeps_utc_date() {
        let formats = DateFormats {
            utc_offset_minutes: -300,
            ..DateFormats::default()
        };
        assert_eq!(format_timestamp(JAN_15_2024, &formats), "Mon, Jan 15");
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert_eq!(format_timestamp(i64::MAX, &DateFormats::default()), "");
    }

    #[test]
    fn test_offset_out_of_range() {
        let formats = DateFormats {
            utc_offset_minutes: 24 * 60,
            ..DateFormats::default()
        };
        assert!(formats.offset().is_none());
        assert!(DateFormats::default().offset().is_some());
    }

    proptest! {
        #[test]
        fn prop_integers_roundtrip_without_separators(v in -1_000_000_000_i64..1_000_000_000) {
            let text = fmt(v as f64);
            let parsed: i64 = text.replace(',', "").parse().unwrap();
            prop_assert_eq!(parsed, v);
        }

        #[test]
        fn prop_never_exponent(v in -1e15_f64..1e15) {
            let text = fmt(v);
            prop_assert!(!text.contains('e'));
        }

        #[test]
        fn prop_nonzero_fraction_never_prints_zero(v in 1e-12_f64..1.0) {
            prop_assert_ne!(fmt(v), "0");
            prop_assert_ne!(fmt(-v), "0");
        }
    }
}
