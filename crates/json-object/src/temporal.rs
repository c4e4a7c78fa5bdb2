//! Calendar date and timestamp text handling.
//!
//! Parsing is permissive in the common ISO-8601 shapes; rendering always
//! produces ISO-8601 text.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemporalError {
    #[error("empty date/time text")]
    Empty,
    #[error("unrecognized date/time text: {0:?}")]
    Unrecognized(String),
}

/// A point in time, with or without a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

impl Timestamp {
    /// Calendar date of the timestamp, in its own offset.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Naive(dt) => dt.date(),
            Self::Offset(dt) => dt.date_naive(),
        }
    }

    /// Wall-clock time, dropping any offset.
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            Self::Naive(dt) => *dt,
            Self::Offset(dt) => dt.naive_local(),
        }
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        match self {
            Self::Naive(_) => None,
            Self::Offset(dt) => Some(*dt.offset()),
        }
    }

    /// ISO-8601 text: `YYYY-MM-DDTHH:MM:SS[.ffffff][+HH:MM]`.
    pub fn to_iso(&self) -> String {
        match self {
            Self::Naive(dt) => iso_naive(dt),
            Self::Offset(dt) => {
                let mut out = iso_naive(&dt.naive_local());
                out.push_str(&dt.format("%:z").to_string());
                out
            }
        }
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self::Naive(value)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Offset(value)
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(value: NaiveDate) -> Self {
        Self::Naive(value.and_time(NaiveTime::MIN))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

// Microsecond precision; the fraction is omitted when zero.
fn iso_naive(dt: &NaiveDateTime) -> String {
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// ISO-8601 calendar date text.
pub fn date_to_iso(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%d %B %Y"];

/// Parse timestamp text. Date-only text yields midnight.
pub fn parse_datetime(text: &str) -> Result<Timestamp, TemporalError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TemporalError::Empty);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(Timestamp::Offset(dt));
    }

    let zulu = text
        .strip_suffix('Z')
        .or_else(|| text.strip_suffix('z'))
        .map(|rest| format!("{rest}+00:00"));
    let with_offset = zulu.as_deref().unwrap_or(text);
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(with_offset, format) {
            return Ok(Timestamp::Offset(dt));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(Timestamp::Naive(dt));
        }
    }
    date_only(text)
        .map(Timestamp::from)
        .ok_or_else(|| TemporalError::Unrecognized(text.to_string()))
}

fn date_only(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| compact_date(text))
}

// `YYYYMMDD`, split by position.
fn compact_date(text: &str) -> Option<NaiveDate> {
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = text[..4].parse().ok()?;
    let month = text[4..6].parse().ok()?;
    let day = text[6..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse calendar date text. Timestamp text is accepted and truncated.
pub fn parse_date(text: &str) -> Result<NaiveDate, TemporalError> {
    let trimmed = text.trim();
    match date_only(trimmed) {
        Some(date) => Ok(date),
        None => parse_datetime(trimmed).map(|ts| ts.date()),
    }
}
