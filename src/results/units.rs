//! Unit-aware measurement parsing
//!
//! BenchmarkDotNet writes `Mean` as `1,234.5 ns` and `Allocated` as
//! `1.5 KB`, but a column may equally hold plain numbers. Each cell is
//! classified once at load time and normalized on demand.

use std::fmt;
use std::str::FromStr;

/// Bytes per mebibyte, used to scale memory for display
pub const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// A single raw cell, classified once at load time
#[derive(Debug, Clone, PartialEq)]
pub enum Measurement {
    /// Empty cell, `NA` or `-`
    Missing,
    /// Plain number, already in the normalized unit
    Number(f64),
    /// Number followed by a unit token
    WithUnit {
        /// Numeric part
        value: f64,
        /// Unit token as written
        unit: String,
    },
    /// Text that is neither missing nor a number
    Unparsable(String),
}

impl Measurement {
    /// Classify a raw cell.
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();
        if text.is_empty() || text == "NA" || text == "-" {
            return Measurement::Missing;
        }

        match split_unit(text) {
            Some((number, unit)) => match parse_number(number) {
                Some(value) => Measurement::WithUnit {
                    value,
                    unit: unit.to_string(),
                },
                None => Measurement::Unparsable(text.to_string()),
            },
            None => match parse_number(text) {
                Some(value) => Measurement::Number(value),
                None => Measurement::Unparsable(text.to_string()),
            },
        }
    }

    /// Execution time in milliseconds.
    ///
    /// Unknown units leave the number unscaled. Values that overflow
    /// when scaled have no value.
    pub fn as_millis(&self) -> Option<f64> {
        let millis = match self {
            Measurement::Number(value) => *value,
            Measurement::WithUnit { value, unit } => match unit.parse::<TimeUnit>() {
                Ok(unit) => unit.to_millis(*value),
                Err(_) => *value,
            },
            Measurement::Missing | Measurement::Unparsable(_) => return None,
        };
        Some(millis).filter(|v| v.is_finite())
    }

    /// Allocated memory in bytes.
    ///
    /// Unknown units are taken as bytes. Values that overflow when
    /// scaled have no value.
    pub fn as_bytes(&self) -> Option<f64> {
        let bytes = match self {
            Measurement::Number(value) => *value,
            Measurement::WithUnit { value, unit } => match unit.parse::<MemoryUnit>() {
                Ok(unit) => unit.to_bytes(*value),
                Err(_) => *value,
            },
            Measurement::Missing | Measurement::Unparsable(_) => return None,
        };
        Some(bytes).filter(|v| v.is_finite())
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Missing => write!(f, "NA"),
            Measurement::Number(value) => write!(f, "{}", value),
            Measurement::WithUnit { value, unit } => write!(f, "{} {}", value, unit),
            Measurement::Unparsable(raw) => write!(f, "{:?}", raw),
        }
    }
}

/// Time units understood in `Mean` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
}

impl TimeUnit {
    /// Convert `value` in this unit to milliseconds
    pub fn to_millis(self, value: f64) -> f64 {
        match self {
            TimeUnit::Nanoseconds => value / 1_000_000.0,
            TimeUnit::Microseconds => value / 1_000.0,
            TimeUnit::Milliseconds => value,
            TimeUnit::Seconds => value * 1_000.0,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ns" => Ok(TimeUnit::Nanoseconds),
            // Greek mu and the micro sign are both seen in the wild
            "us" | "μs" | "µs" => Ok(TimeUnit::Microseconds),
            "ms" => Ok(TimeUnit::Milliseconds),
            "s" => Ok(TimeUnit::Seconds),
            _ => Err(UnknownUnit(s.to_string())),
        }
    }
}

/// Memory units understood in `Allocated` cells (base 1024)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryUnit {
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
}

impl MemoryUnit {
    /// Convert `value` in this unit to bytes
    pub fn to_bytes(self, value: f64) -> f64 {
        match self {
            MemoryUnit::Bytes => value,
            MemoryUnit::Kilobytes => value * 1024.0,
            MemoryUnit::Megabytes => value * 1024.0 * 1024.0,
            MemoryUnit::Gigabytes => value * 1024.0 * 1024.0 * 1024.0,
        }
    }
}

impl FromStr for MemoryUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "B" => Ok(MemoryUnit::Bytes),
            "KB" => Ok(MemoryUnit::Kilobytes),
            "MB" => Ok(MemoryUnit::Megabytes),
            "GB" => Ok(MemoryUnit::Gigabytes),
            _ => Err(UnknownUnit(s.to_string())),
        }
    }
}

/// Unit token that is not in the known table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown unit: {0}")]
pub struct UnknownUnit(pub String);

/// Split `text` into a numeric literal and a trailing unit token.
///
/// Accepts `1,234.5 ns` as well as the attached form `12ms`. Returns
/// `None` when there is no alphabetic unit, so the caller can try the
/// whole text as a number.
fn split_unit(text: &str) -> Option<(&str, &str)> {
    let mut parts = text.split_whitespace();
    if let (Some(number), Some(unit)) = (parts.next(), parts.next()) {
        return Some((number, unit));
    }

    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == ',' || c == '.'))
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(end);
    let unit = unit.trim_start();
    if number.is_empty() || unit.is_empty() || !unit.chars().all(char::is_alphabetic) {
        return None;
    }
    Some((number, unit))
}

/// Parse a decimal literal, ignoring thousands separators.
fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|&c| c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_scaling_is_consistent() {
        let ns = Measurement::parse("1000 ns").as_millis();
        let us = Measurement::parse("1 us").as_millis();
        let ms = Measurement::parse("0.001 ms").as_millis();
        assert_eq!(ns, Some(0.001));
        assert_eq!(ns, us);
        assert_eq!(us, ms);
        assert_eq!(Measurement::parse("3 s").as_millis(), Some(3000.0));
    }

    #[test]
    fn test_micro_spellings() {
        assert_eq!(Measurement::parse("250 μs").as_millis(), Some(0.25));
        assert_eq!(Measurement::parse("250 µs").as_millis(), Some(0.25));
        assert_eq!(Measurement::parse("250 US").as_millis(), Some(0.25));
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(
            Measurement::parse("1,234,000 ns").as_millis(),
            Some(1.234)
        );
        assert_eq!(Measurement::parse("1,500").as_millis(), Some(1500.0));
    }

    #[test]
    fn test_attached_unit() {
        assert_eq!(Measurement::parse("120ms").as_millis(), Some(120.0));
        assert_eq!(Measurement::parse("2KB").as_bytes(), Some(2048.0));
    }

    #[test]
    fn test_memory_scaling() {
        assert_eq!(Measurement::parse("1 KB").as_bytes(), Some(1024.0));
        assert_eq!(Measurement::parse("1 MB").as_bytes(), Some(1024.0 * 1024.0));
        assert_eq!(
            Measurement::parse("1 GB").as_bytes(),
            Some(1024.0 * 1024.0 * 1024.0)
        );
        assert_eq!(Measurement::parse("512 B").as_bytes(), Some(512.0));
        assert_eq!(Measurement::parse("1.5 kb").as_bytes(), Some(1536.0));
    }

    #[test]
    fn test_missing_tokens_are_not_zero() {
        for raw in ["", "   ", "NA", "-", " - "] {
            let m = Measurement::parse(raw);
            assert_eq!(m, Measurement::Missing, "raw = {:?}", raw);
            assert_eq!(m.as_millis(), None);
            assert_eq!(m.as_bytes(), None);
        }
    }

    #[test]
    fn test_unknown_unit_falls_back_to_number() {
        assert_eq!(Measurement::parse("42 ticks").as_millis(), Some(42.0));
        assert_eq!(Measurement::parse("42 words").as_bytes(), Some(42.0));
    }

    #[test]
    fn test_plain_number() {
        assert_eq!(Measurement::parse("17.25"), Measurement::Number(17.25));
        assert_eq!(Measurement::parse("17.25").as_bytes(), Some(17.25));
    }

    #[test]
    fn test_malformed_number_is_missing() {
        let m = Measurement::parse("1.2.3 ms");
        assert!(matches!(m, Measurement::Unparsable(_)));
        assert_eq!(m.as_millis(), None);

        assert!(matches!(Measurement::parse("N/A"), Measurement::Unparsable(_)));
        assert!(matches!(Measurement::parse("?"), Measurement::Unparsable(_)));
    }

    #[test]
    fn test_overflow_after_scaling_is_missing() {
        let time = Measurement::parse("1e308 s");
        assert!(matches!(time, Measurement::WithUnit { .. }));
        assert_eq!(time.as_millis(), None);

        let memory = Measurement::parse("1e306 GB");
        assert_eq!(memory.as_bytes(), None);

        // Still representable, so kept
        assert!(Measurement::parse("1e300 s").as_millis().is_some());
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("NS".parse::<TimeUnit>(), Ok(TimeUnit::Nanoseconds));
        assert_eq!("gb".parse::<MemoryUnit>(), Ok(MemoryUnit::Gigabytes));
        assert_eq!(
            "min".parse::<TimeUnit>(),
            Err(UnknownUnit("min".to_string()))
        );
    }
}
