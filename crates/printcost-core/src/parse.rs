//! # Input Parsing
//!
//! Converts form-style text into numbers.
//!
//! ## Leniency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Parsing NEVER fails. Anything unreadable becomes 0.                    │
//! │                                                                         │
//! │  "0,70"     ──► 0.70        "2,30" (hours_minutes) ──► 2.5             │
//! │  "1500,75"  ──► 1500.75     "2.5"  (decimal_hours) ──► 2.5             │
//! │  "abc"      ──► 0.0         "3"    (either)        ──► 3.0             │
//! │  ""         ──► 0.0                                                     │
//! │                                                                         │
//! │  The engine's validation then rejects zero price/weight.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// Decimal Numbers
// =============================================================================

/// Parses a decimal number written with either `.` or `,` as separator.
///
/// Every comma is replaced by a point before parsing, so thousands
/// separators are not supported: `"1.500,75"` becomes `"1.500.75"`, which
/// does not parse and yields `0.0`.
///
/// ## Example
/// ```rust
/// use printcost_core::parse::parse_decimal;
///
/// assert_eq!(parse_decimal("0,70"), 0.70);
/// assert_eq!(parse_decimal("220"), 220.0);
/// assert_eq!(parse_decimal("abc"), 0.0);
/// ```
pub fn parse_decimal(input: &str) -> f64 {
    let normalized = input.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parses a positive item quantity, falling back to 1.
pub fn parse_quantity(input: &str) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(qty) if qty > 0 => qty,
        _ => 1,
    }
}

// =============================================================================
// Durations
// =============================================================================

/// How duration text is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationFormat {
    /// `"2,30"` means 2 hours and 30 minutes.
    ///
    /// The digits after the separator are a literal minute count.
    #[default]
    HoursMinutes,

    /// `"2,5"` means two and a half hours.
    DecimalHours,
}

impl fmt::Display for DurationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationFormat::HoursMinutes => write!(f, "hours_minutes"),
            DurationFormat::DecimalHours => write!(f, "decimal_hours"),
        }
    }
}

impl FromStr for DurationFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "hours_minutes" | "hm" => Ok(DurationFormat::HoursMinutes),
            "decimal_hours" | "decimal" => Ok(DurationFormat::DecimalHours),
            other => Err(format!(
                "unknown duration format '{}' (expected hours_minutes or decimal_hours)",
                other
            )),
        }
    }
}

/// Parses a duration into decimal hours.
///
/// ## Example
/// ```rust
/// use printcost_core::parse::{parse_duration, DurationFormat};
///
/// assert_eq!(parse_duration("2,30", DurationFormat::HoursMinutes), 2.5);
/// assert_eq!(parse_duration("2,5", DurationFormat::DecimalHours), 2.5);
/// assert_eq!(parse_duration("3", DurationFormat::HoursMinutes), 3.0);
/// ```
pub fn parse_duration(input: &str, format: DurationFormat) -> f64 {
    match format {
        DurationFormat::DecimalHours => parse_decimal(input),
        DurationFormat::HoursMinutes => parse_hours_minutes(input),
    }
}

fn parse_hours_minutes(input: &str) -> f64 {
    let input = input.trim();
    if input.is_empty() {
        return 0.0;
    }

    let (hours_part, minutes_part) = match input.find(|c: char| c == ',' || c == '.') {
        Some(idx) => (&input[..idx], &input[idx + 1..]),
        None => (input, ""),
    };

    let hours = match parse_whole(hours_part) {
        Some(h) => h,
        None => return 0.0,
    };
    let minutes = match parse_whole(minutes_part) {
        Some(m) => m,
        None => return 0.0,
    };

    hours as f64 + minutes as f64 / 60.0
}

/// Reads a non-negative integer; an empty part counts as zero.
fn parse_whole(part: &str) -> Option<u64> {
    let part = part.trim();
    if part.is_empty() {
        return Some(0);
    }
    part.parse::<u64>().ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
