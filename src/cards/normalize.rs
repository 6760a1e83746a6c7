//! Value normalization: raw fact text → display string + comparable number.
//!
//! ## Quantities
//!
//! The raw value is a decimal. Integral values display without decimals,
//! everything else with two. Thousands are grouped with a space. The unit
//! label is abbreviated through a fixed replacement table; the dimensionless
//! "count" unit gets no suffix at all. Miles are the one unit that is
//! converted: value × 1.6, shown as `km`.
//!
//! ## Times
//!
//! The raw value is an ISO-8601 timestamp. The comparable number is epoch
//! milliseconds; the display text depends on the precision code:
//!
//! | precision | display          |
//! |-----------|------------------|
//! | ≥ 11      | `1969-07-20`     |
//! | 10        | `1969-07`        |
//! | 9         | `1969`           |
//! | 8         | `1960s`          |
//! | 7         | `20th century`   |
//! | lower     | `a long time ago`|
//!
//! Malformed numbers and dates become NaN rather than errors.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::core::{DeckConfig, Fact};

/// Display text for dates coarser than a century.
pub const LONG_AGO: &str = "a long time ago";

/// Display separator between thousands groups.
const THOUSANDS_SEPARATOR: char = ' ';

const MILE_LABEL: &str = "mile";
const MILE_TO_KM: f64 = 1.6;

/// Unit abbreviations, applied in order to the first occurrence only.
///
/// Several patterns are substrings of later ones' inputs (`metre` inside
/// `square kilometre`), so the longer names must come first.
const UNIT_ABBREVIATIONS: &[(&str, &str)] = &[
    (" per ", "/"),
    ("kilogram", "kg"),
    ("gram", "g"),
    ("cubic metre", "m^3"),
    ("square metre", "m^2"),
    ("centimetre", "cm"),
    ("square kilometre", "km^2"),
    ("kilometre", "km"),
    ("mile", "mi"),
    ("metre", "m"),
    ("millim", "mm"),
    ("astronomical unit", "au"),
    ("1", ""),
];

/// Result of normalizing one raw value.
#[derive(Clone, Debug, PartialEq)]
pub struct Normalized {
    pub display: String,
    pub numeric: f64,
}

/// Converts fact values into display/numeric pairs.
#[derive(Clone, Debug)]
pub struct ValueNormalizer {
    count_unit: String,
}

impl Default for ValueNormalizer {
    fn default() -> Self {
        Self::from_config(&DeckConfig::default())
    }
}

impl ValueNormalizer {
    /// Create a normalizer that treats `count_unit` as dimensionless.
    #[must_use]
    pub fn new(count_unit: impl Into<String>) -> Self {
        Self {
            count_unit: count_unit.into(),
        }
    }

    /// Create a normalizer from deck configuration.
    #[must_use]
    pub fn from_config(config: &DeckConfig) -> Self {
        Self::new(config.count_unit.clone())
    }

    /// Normalize one fact's value.
    #[must_use]
    pub fn normalize(&self, fact: &Fact) -> Normalized {
        match fact.precision.as_deref() {
            Some(precision) => Normalized {
                display: format_date(&fact.value, precision.trim().parse().ok()),
                numeric: parse_timestamp_millis(&fact.value),
            },
            None => self.normalize_quantity(fact),
        }
    }

    fn normalize_quantity(&self, fact: &Fact) -> Normalized {
        let raw = parse_number(&fact.value);
        let decimals = if raw.round() == raw { 0 } else { 2 };

        let mut unit_label = fact.unit_label.as_deref().unwrap_or("");
        let mut value = raw;
        if unit_label == MILE_LABEL {
            unit_label = "km";
            value = raw * MILE_TO_KM;
        }

        let mut display = format_number(value, decimals);
        let is_count = fact.unit.as_deref() == Some(self.count_unit.as_str());
        if !unit_label.is_empty() && !is_count {
            display.push(' ');
            display.push_str(&simplify_unit(unit_label));
        }

        Normalized { display, numeric: value }
    }
}

fn parse_number(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

/// Parse an ISO-8601 timestamp into epoch milliseconds, NaN if malformed.
#[must_use]
pub fn parse_timestamp_millis(raw: &str) -> f64 {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.timestamp_millis() as f64;
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return dt.and_utc().timestamp_millis() as f64;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map_or(f64::NAN, |dt| dt.and_utc().timestamp_millis() as f64)
}

/// Format a date string according to its precision code.
///
/// `date` is expected in `YYYY-MM-DDTHH:MM:SSZ` form; only its leading
/// characters are used.
#[must_use]
pub fn format_date(date: &str, precision: Option<i64>) -> String {
    match precision {
        Some(p) if p >= 11 => prefix(date, 10),
        Some(10) => prefix(date, 7),
        Some(9) => prefix(date, 4),
        Some(8) => format!("{}0s", prefix(date, 3)),
        Some(7) => match prefix(date, 2).parse::<i64>() {
            Ok(century) => format!("{} century", ordinal(century + 1)),
            Err(_) => LONG_AGO.to_string(),
        },
        _ => LONG_AGO.to_string(),
    }
}

fn prefix(text: &str, chars: usize) -> String {
    text.chars().take(chars).collect()
}

/// English ordinal: 1st, 2nd, 3rd, 4th, ..., 11th, 12th, 13th, 21st.
#[must_use]
pub fn ordinal(n: i64) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, r) if r != 11 => "st",
        (2, r) if r != 12 => "nd",
        (3, r) if r != 13 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Format a number with `decimals` decimal places and space-grouped thousands.
///
/// Rounds half up. Non-finite values format as zero.
#[must_use]
pub fn format_number(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let scale = 10f64.powi(decimals as i32);
    // `+ 0.0` turns -0.0 into 0.0
    let rounded = (value * scale + 0.5).floor() / scale + 0.0;
    let text = format!("{rounded:.decimals$}");

    match text.split_once('.') {
        Some((int_part, frac_part)) => format!("{}.{}", group_thousands(int_part), frac_part),
        None => group_thousands(&text),
    }
}

fn group_thousands(int_part: &str) -> String {
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut out = String::with_capacity(int_part.len() + digits.len() / 3);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Abbreviate a unit label ("square kilometre" → "km^2").
#[must_use]
pub fn simplify_unit(label: &str) -> String {
    UNIT_ABBREVIATIONS
        .iter()
        .fold(label.to_string(), |text, (from, to)| text.replacen(from, to, 1))
}
