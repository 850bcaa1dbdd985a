//! Birthday record and recurring-occurrence date math.
//!
//! A record's (month, day) pair is a recurring annual event; the year of
//! `created_at` is administrative only and never enters birthday math.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{JubileeError, Result};

/// How far ahead (in days) a birthday counts as "upcoming".
pub const UPCOMING_WINDOW_DAYS: i64 = 30;

/// A stored birthday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Birthday {
    /// Opaque unique identifier, assigned at creation.
    pub id: Uuid,
    /// Display name; no uniqueness constraint.
    pub name: String,
    /// Month 1-12.
    pub month: u32,
    /// Day 1-31.
    pub day: u32,
    /// Insertion timestamp, administrative only.
    pub created_at: DateTime<Utc>,
}

impl Birthday {
    /// Create a record with a fresh id and the current timestamp.
    pub fn new(name: impl Into<String>, month: u32, day: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            month,
            day,
            created_at: Utc::now(),
        }
    }

    /// The next occurrence of this birthday at midnight, on or after `now`.
    ///
    /// This year's occurrence is used unless it is strictly before `now`,
    /// in which case the date rolls forward to next year.
    pub fn next_occurrence(&self, now: NaiveDateTime) -> NaiveDateTime {
        let this_year = occurrence_in_year(now.date().year(), self.month, self.day)
            .and_hms_opt(0, 0, 0)
            .unwrap_or(now);
        if this_year < now {
            occurrence_in_year(now.date().year() + 1, self.month, self.day)
                .and_hms_opt(0, 0, 0)
                .unwrap_or(now)
        } else {
            this_year
        }
    }

    /// Whole days until the next occurrence: floor(hours / 24).
    pub fn days_until(&self, now: NaiveDateTime) -> i64 {
        let occurrence = self.next_occurrence(now);
        (occurrence - now).num_hours() / 24
    }

    /// Whether this birthday falls inside the forward window (exclusive of
    /// today, inclusive of day 30).
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        let days = self.days_until(now);
        days > 0 && days <= UPCOMING_WINDOW_DAYS
    }

    /// Whether this birthday's (month, day) equals the given calendar day.
    ///
    /// Computed by direct equality, independent of the window math, so the
    /// answer is immune to hour-division rounding.
    pub fn matches_day(&self, date: NaiveDate) -> bool {
        self.month == date.month() && self.day == date.day()
    }

    /// Full month name, e.g. "January".
    pub fn month_name(&self) -> String {
        month_name(self.month)
    }
}

/// The (month, day) occurrence in a specific year. An out-of-range day
/// rolls into the next month, so Feb 29 in a non-leap year becomes Mar 1.
pub fn occurrence_in_year(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) => d,
        None => {
            let first = NaiveDate::from_ymd_opt(year, month, 1)
                .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 1, 1).expect("valid date"));
            first + Duration::days(i64::from(day) - 1)
        }
    }
}

/// Full month name for a 1-based month number.
pub fn month_name(month: u32) -> String {
    NaiveDate::from_ymd_opt(2000, month, 1)
        .map(|d| d.format("%B").to_string())
        .unwrap_or_else(|| month.to_string())
}

/// Parse a birthday date string into (month, day).
///
/// A 5-character input is `MM-DD` (no year); anything else must parse as
/// `YYYY-M-D`. Both forms are validated against the calendar (a leap year
/// is assumed for the year-less form, so `02-29` is accepted).
pub fn parse_birth_date(date: &str) -> Result<(u32, u32)> {
    if date.len() == 5 {
        let (m, d) = date
            .split_once('-')
            .ok_or_else(|| JubileeError::InvalidDate(date.to_string()))?;
        let month: u32 = m
            .parse()
            .map_err(|_| JubileeError::InvalidDate(date.to_string()))?;
        let day: u32 = d
            .parse()
            .map_err(|_| JubileeError::InvalidDate(date.to_string()))?;
        NaiveDate::from_ymd_opt(2000, month, day)
            .ok_or_else(|| JubileeError::InvalidDate(date.to_string()))?;
        Ok((month, day))
    } else {
        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| JubileeError::InvalidDate(date.to_string()))?;
        Ok((parsed.month(), parsed.day()))
    }
}

// =============================================================================
// Tests
// =============================================================================
