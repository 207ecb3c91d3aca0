//! Civil-date handling in the fixed MST offset used for session scheduling.
//!
//! MST here is always exactly UTC-7; daylight saving is never applied.

use crate::utils::error::{Result, SignupError};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use std::fmt;
use std::str::FromStr;

/// Hours the scheduling calendar sits behind UTC.
pub const MST_OFFSET_HOURS: i64 = 7;

/// A `YYYY-MM-DD` date as written, before calendar normalization.
///
/// Components are kept as parsed. Out-of-range months and days are not
/// rejected; [`CalendarDate::to_naive_date`] rolls them over the way calendar
/// arithmetic does (`2024-13-01` is `2025-01-01`, `2024-06-00` is `2024-05-31`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub year: i64,
    pub month: i64,
    pub day: i64,
}

impl CalendarDate {
    pub fn parse(input: &str) -> Result<Self> {
        let segments: Vec<&str> = input.split('-').collect();
        if segments.len() != 3 {
            return Err(SignupError::InvalidDateError {
                input: input.to_string(),
                reason: format!("expected 3 segments, found {}", segments.len()),
            });
        }

        let mut parts = [0i64; 3];
        for (slot, segment) in parts.iter_mut().zip(&segments) {
            *slot = segment
                .parse::<i64>()
                .map_err(|e| SignupError::InvalidDateError {
                    input: input.to_string(),
                    reason: format!("segment '{}' is not an integer: {}", segment, e),
                })?;
        }

        Ok(Self {
            year: parts[0],
            month: parts[1],
            day: parts[2],
        })
    }

    /// Normalized calendar date, or `None` when outside chrono's range.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        let month0 = self.month.checked_sub(1)?;
        let year = self.year.checked_add(month0.div_euclid(12))?;
        let month = u32::try_from(month0.rem_euclid(12) + 1).ok()?;
        let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;
        first.checked_add_signed(TimeDelta::try_days(self.day.checked_sub(1)?)?)
    }
}

impl FromStr for CalendarDate {
    type Err = SignupError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Calendar date in MST at the instant `now`.
pub fn mst_today(now: DateTime<Utc>) -> Option<NaiveDate> {
    now.checked_sub_signed(TimeDelta::hours(MST_OFFSET_HOURS))
        .map(|shifted| shifted.date_naive())
}

/// The calendar day `input` denotes after roll-over, if it parses at all.
pub fn canonical_date(input: &str) -> Option<NaiveDate> {
    CalendarDate::parse(input)
        .ok()
        .and_then(|date| date.to_naive_date())
}

/// Whether `input` names a day strictly after today in MST.
///
/// Anything that is not three hyphen-separated integers is `false`; so is
/// today itself.
pub fn is_future_date_in_mst(input: &str, now: DateTime<Utc>) -> bool {
    let Some(candidate) = canonical_date(input) else {
        return false;
    };

    match mst_today(now) {
        Some(today) => candidate > today,
        None => false,
    }
}

/// [`is_future_date_in_mst`] against the wall clock.
pub fn is_future_date(input: &str) -> bool {
    is_future_date_in_mst(input, Utc::now())
}
