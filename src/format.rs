//! Human-readable formatting of durations and byte sizes, and whitespace
//! trimming.

use crate::{Error, Result};

/// A number of seconds split into days, hours, minutes and seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DurationParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    /// Keeps any fractional part of the input.
    pub seconds: f64,
}

/// Splits `total_seconds` into days, hours, minutes and seconds.
///
/// `days = floor(t / 86400)`, `hours = floor(t / 3600) mod 24`,
/// `minutes = floor(t / 60) mod 60`, `seconds = t mod 60`, all with floored
/// modulo so negative input stays consistent.
///
/// # Errors
///
/// [`Error::Type`] for NaN, [`Error::InvalidArgument`] for infinite input.
///
/// # Examples
///
/// ```rust
/// use tabletext::format::format_duration;
///
/// let parts = format_duration(90061.0).unwrap();
/// assert_eq!((parts.days, parts.hours, parts.minutes), (1, 1, 1));
/// assert_eq!(parts.seconds, 1.0);
/// ```
pub fn format_duration(total_seconds: f64) -> Result<DurationParts> {
    if total_seconds.is_nan() {
        return Err(Error::type_error("format_duration: input is not a number"));
    }
    if total_seconds.is_infinite() {
        return Err(Error::invalid_argument(
            "format_duration: input must be finite",
        ));
    }

    let t = total_seconds;
    Ok(DurationParts {
        days: (t / 86400.0).floor() as i64,
        hours: ((t / 3600.0).floor() as i64).rem_euclid(24),
        minutes: ((t / 60.0).floor() as i64).rem_euclid(60),
        seconds: t.rem_euclid(60.0),
    })
}

const BYTE_UNITS: [&str; 8] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "YB"];

/// Renders a byte count with a binary (1024) scale.
///
/// Units run `B, KB, MB, GB, TB, PB, EB, YB`; there is no `ZB`, so the
/// step after `EB` jumps straight to `YB`. Bytes print with no decimals,
/// everything else with two.
///
/// # Errors
///
/// [`Error::InvalidArgument`] for negative or infinite input, [`Error::Type`]
/// for NaN.
///
/// # Examples
///
/// ```rust
/// use tabletext::format::format_byte_size;
///
/// assert_eq!(format_byte_size(0.0).unwrap(), "0 B");
/// assert_eq!(format_byte_size(1536.0).unwrap(), "1.50 KB");
/// ```
pub fn format_byte_size(bytes: f64) -> Result<String> {
    if bytes.is_nan() {
        return Err(Error::type_error("format_byte_size: input is not a number"));
    }
    if bytes.is_infinite() || bytes < 0.0 {
        return Err(Error::invalid_argument(&format!(
            "format_byte_size: expected a finite, non-negative size, got {}",
            bytes
        )));
    }
    if bytes == 0.0 {
        return Ok("0 B".to_string());
    }

    let mut scaled = bytes;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        Ok(format!("{:.0} {}", scaled, BYTE_UNITS[unit]))
    } else {
        Ok(format!("{:.2} {}", scaled, BYTE_UNITS[unit]))
    }
}

/// Strips ASCII whitespace (space, tab, newline, carriage return, vertical
/// tab, form feed) from both ends of `s`.
///
/// # Examples
///
/// ```rust
/// use tabletext::format::trim_whitespace;
///
/// assert_eq!(trim_whitespace("  hi  "), "hi");
/// assert_eq!(trim_whitespace("   "), "");
/// ```
#[must_use]
pub fn trim_whitespace(s: &str) -> &str {
    s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_under_a_minute() {
        let parts = format_duration(59.0).unwrap();
        assert_eq!(
            parts,
            DurationParts {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 59.0
            }
        );
    }

    #[test]
    fn test_duration_keeps_fraction() {
        let parts = format_duration(61.5).unwrap();
        assert_eq!(parts.minutes, 1);
        assert_eq!(parts.seconds, 1.5);
    }

    #[test]
    fn test_duration_rejects_non_finite() {
        assert!(matches!(format_duration(f64::NAN), Err(Error::Type(_))));
        assert!(matches!(
            format_duration(f64::INFINITY),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_byte_sizes() {
        assert_eq!(format_byte_size(1.0).unwrap(), "1 B");
        assert_eq!(format_byte_size(1023.0).unwrap(), "1023 B");
        assert_eq!(format_byte_size(1024.0).unwrap(), "1.00 KB");
        assert_eq!(format_byte_size(1048576.0).unwrap(), "1.00 MB");
        assert_eq!(format_byte_size(5.5 * 1024.0 * 1024.0 * 1024.0).unwrap(), "5.50 GB");
    }

    #[test]
    fn test_byte_size_skips_zettabytes() {
        let one_zb = 1024f64.powi(7);
        assert_eq!(format_byte_size(one_zb).unwrap(), "1.00 YB");
        assert_eq!(format_byte_size(one_zb * 2048.0).unwrap(), "2048.00 YB");
    }

    #[test]
    fn test_byte_size_rejects_bad_input() {
        assert!(matches!(format_byte_size(-1.0), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            format_byte_size(f64::INFINITY),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(format_byte_size(f64::NAN), Err(Error::Type(_))));
    }

    #[test]
    fn test_trim_keeps_inner_whitespace() {
        assert_eq!(trim_whitespace("\t a b \r\n"), "a b");
        assert_eq!(trim_whitespace(""), "");
        assert_eq!(trim_whitespace("\u{a0}x\u{a0}"), "\u{a0}x\u{a0}");
    }
}
