//! Calendar-day parsing and inclusive date ranges.
//!
//! The history endpoint sends dates in the `dd/mm/yyyy` display format while
//! HTML date inputs hold `yyyy-mm-dd`. Both are parsed here, and only here,
//! into [`NaiveDate`] so every comparison in the crate happens on real days
//! rather than on strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DateParseError;

/// Parse a `dd/mm/yyyy` display date (e.g. `"10/06/2024"`).
///
/// Day and month may be written with one or two digits; the year must have
/// four. Surrounding whitespace is ignored.
pub fn parse_display_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let [day, month, year] = split_components(input, '/')?;
    build_date(input, year, month, day)
}

/// Parse the `yyyy-mm-dd` value of an `<input type="date">`.
pub fn parse_input_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let [year, month, day] = split_components(input, '-')?;
    build_date(input, year, month, day)
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_input_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn split_components(input: &str, separator: char) -> Result<[&str; 3], DateParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DateParseError::Empty);
    }

    let parts: Vec<&str> = trimmed.split(separator).collect();
    match parts.as_slice() {
        [a, b, c] => Ok([*a, *b, *c]),
        _ => Err(DateParseError::Components {
            input: input.to_string(),
            expected: 3,
        }),
    }
}

fn build_date(
    input: &str,
    year: &str,
    month: &str,
    day: &str,
) -> Result<NaiveDate, DateParseError> {
    let year = numeric(input, year, 4, 4)?;
    let month = numeric(input, month, 1, 2)?;
    let day = numeric(input, day, 1, 2)?;

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| DateParseError::OutOfRange(input.to_string()))
}

/// Digits only (no sign, no inner whitespace), with a bounded width.
fn numeric(
    input: &str,
    component: &str,
    min_len: usize,
    max_len: usize,
) -> Result<u32, DateParseError> {
    let well_formed = (min_len..=max_len).contains(&component.len())
        && component.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(DateParseError::NotNumeric {
            input: input.to_string(),
            component: component.to_string(),
        });
    }
    component.parse().map_err(|_| DateParseError::NotNumeric {
        input: input.to_string(),
        component: component.to_string(),
    })
}

/// An inclusive span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Returns `None` when `end` falls before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (end >= start).then_some(Self { start, end })
    }

    /// Two inclusive ranges overlap when they share at least one day, so a
    /// single-day range touching the edge of another still counts.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Number of calendar days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
