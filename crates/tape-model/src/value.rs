use chrono::{NaiveDate, NaiveDateTime};

/// A single tape cell.
///
/// Tapes arrive with loosely typed cells: amounts and codes as numbers or
/// digit strings, dates as text in several layouts or as `YYYYMMDD`
/// integers, flags as numbers or `true`/`false` literals. The variant is
/// closed so every blank/coercion check a rule performs is a total function
/// over it.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Missing,
    Number(f64),
    Text(String),
    Date(NaiveDate),
    Bool(bool),
}

/// Date layouts accepted when coercing text cells to dates.
const DATE_LAYOUTS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];
const DATETIME_LAYOUTS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

impl CellValue {
    /// Returns true for the absent sentinel, a numeric NaN, or a string
    /// that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Number(n) => n.is_nan(),
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Date(_) | CellValue::Bool(_) => false,
        }
    }

    /// Coerces to f64. Booleans count as 0/1; NaN and non-numeric text are
    /// not numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if !n.is_nan() => Some(*n),
            CellValue::Text(s) => parse_f64(s),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Coerces to i64, accepting integral floats and digit strings
    /// (including float renderings like "6.0").
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Number(n) => integral(*n),
            CellValue::Text(s) => parse_i64(s),
            CellValue::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Coerces to a date. Text cells are tried against the known layouts;
    /// numeric cells are read as `YYYYMMDD` codes.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::Text(s) => parse_date(s),
            CellValue::Number(n) => integral(*n).and_then(date_from_compact),
            _ => None,
        }
    }

    /// The text content of a text cell, untouched. None for every other
    /// variant.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Renders the value for display (loan numbers in reports, etc.).
    /// Missing renders as the empty string.
    pub fn display(&self) -> String {
        match self {
            CellValue::Missing => String::new(),
            CellValue::Number(n) => format_numeric(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    // Strip unnecessary trailing zeros while keeping at least one digit
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Parses a string as i64, falling back to an integral float parse so
/// values like "720.0" still read as 720.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(integral))
}

fn integral(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(&n) {
        Some(n as i64)
    } else {
        None
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for layout in DATE_LAYOUTS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, layout) {
            return Some(date);
        }
    }
    for layout in DATETIME_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Some(dt.date());
        }
    }
    None
}

/// Reads an integer date code like 20240131 as a date.
fn date_from_compact(code: i64) -> Option<NaiveDate> {
    if !(10_000_101..=99_991_231).contains(&code) {
        return None;
    }
    let year = i32::try_from(code / 10_000).ok()?;
    let month = u32::try_from((code / 100) % 100).ok()?;
    let day = u32::try_from(code % 100).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
