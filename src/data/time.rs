//! Time axis handling: monthly ordinals and CF time units.

use crate::error::{Result, SstError};
use chrono::{Duration, Months, NaiveDate, NaiveDateTime};
use std::fmt;

/// Conversion between a monthly time index and a calendar month.
///
/// Index 0 is January 1854 and each step is one calendar month, so
/// index 2012 is September 2021.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthIndex;

impl MonthIndex {
    /// Year of index 0.
    pub const EPOCH_YEAR: i32 = 1854;

    /// Calendar (year, month) for a time index. Month is 1-based.
    ///
    /// `None` when the year does not fit in an `i32`.
    pub fn year_month(index: usize) -> Option<(i32, u32)> {
        let year = i32::try_from(index / 12)
            .ok()
            .and_then(|y| y.checked_add(Self::EPOCH_YEAR))?;
        let month = (index % 12) as u32 + 1;
        Some((year, month))
    }

    /// Time index for a calendar month, or `None` before the epoch.
    pub fn from_year_month(year: i32, month: u32) -> Option<usize> {
        if !(1..=12).contains(&month) || year < Self::EPOCH_YEAR {
            return None;
        }
        Some((year - Self::EPOCH_YEAR) as usize * 12 + (month - 1) as usize)
    }

    /// Parse a `YYYY-MM` string into a time index.
    pub fn parse(text: &str) -> Result<usize> {
        let invalid = || SstError::InvalidMonth(text.to_string());

        let (year, month) = text.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::from_year_month(year, month).ok_or_else(invalid)
    }

    /// Short label such as `Sep 2021`.
    pub fn label(index: usize) -> String {
        match Self::year_month(index) {
            Some((year, month)) => match NaiveDate::from_ymd_opt(year, month, 1) {
                Some(date) => date.format("%b %Y").to_string(),
                None => format!("{:04}-{:02}", year, month),
            },
            None => format!("month {}", index),
        }
    }
}

/// Unit of a CF time offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
}

/// A decoded CF time axis (`<unit> since <reference>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeAxis {
    unit: TimeUnit,
    reference: NaiveDateTime,
}

impl TimeAxis {
    /// Parse a CF `units` attribute such as `days since 1854-01-01 00:00:00`.
    pub fn parse(units: &str) -> Option<Self> {
        let (unit, reference) = units.trim().split_once(" since ")?;

        let unit = match unit.trim().to_lowercase().as_str() {
            "seconds" | "second" | "secs" | "sec" | "s" => TimeUnit::Seconds,
            "minutes" | "minute" | "mins" | "min" => TimeUnit::Minutes,
            "hours" | "hour" | "hrs" | "hr" | "h" => TimeUnit::Hours,
            "days" | "day" | "d" => TimeUnit::Days,
            "months" | "month" => TimeUnit::Months,
            _ => return None,
        };

        Some(Self {
            unit,
            reference: parse_reference(reference)?,
        })
    }

    /// Reference date of the axis.
    pub fn reference(&self) -> NaiveDateTime {
        self.reference
    }

    /// Convert an offset along this axis to a date and time.
    pub fn decode(&self, value: f64) -> Option<NaiveDateTime> {
        if !value.is_finite() {
            return None;
        }

        let seconds_per_unit = match self.unit {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3_600.0,
            TimeUnit::Days => 86_400.0,
            TimeUnit::Months => {
                // Whole months only; fractional months have no calendar meaning.
                if value < 0.0 || value.fract() != 0.0 {
                    return None;
                }
                return self.reference.checked_add_months(Months::new(value as u32));
            },
        };

        let seconds = (value * seconds_per_unit).round() as i64;
        self.reference
            .checked_add_signed(Duration::try_seconds(seconds)?)
    }
}

fn parse_reference(text: &str) -> Option<NaiveDateTime> {
    let text = text
        .trim()
        .trim_end_matches(" UTC")
        .trim_end_matches('Z')
        .trim();

    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    // Date only, possibly followed by a time we could not parse.
    let date_part = text.split([' ', 'T']).next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Human readable label for one time step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLabel {
    /// Time index the label belongs to.
    pub index: usize,
    /// Month label derived from the index.
    pub month: String,
    /// Averaging interval read from the time bounds, when available.
    pub bounds: Option<(NaiveDate, NaiveDate)>,
}

impl TimeLabel {
    /// Label for an index without bounds information.
    pub fn for_index(index: usize) -> Self {
        Self {
            index,
            month: MonthIndex::label(index),
            bounds: None,
        }
    }

    /// Attach a decoded averaging interval.
    pub fn with_bounds(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.bounds = Some((start, end));
        self
    }
}

impl fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (t={})", self.month, self.index)?;
        if let Some((start, end)) = self.bounds {
            write!(f, " [{} .. {}]", start, end)?;
        }
        Ok(())
    }
}
