//! Calendar arithmetic for underwriting
//!
//! This module provides:
//! - Parsing of ISO calendar dates (`YYYY-MM-DD`)
//! - Whole-year age calculation relative to an explicit reference date
//! - Jurisdiction timezones, used to resolve "today" deterministically

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use std::str::FromStr;


/// Date format accepted for birth dates and reference dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timezone wrapper for provider jurisdictions
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for Timezone {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s.trim())
            .map(Timezone)
            .map_err(|_| TemporalError::InvalidTimezone(s.to_string()))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Returns the current calendar date in this timezone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.0).date_naive()
    }

    /// Returns the IANA name of the timezone
    pub fn name(&self) -> &'static str {
        self.0.name()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::Europe::Rome)
    }
}

/// Errors related to calendar operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid date '{input}': expected format YYYY-MM-DD")]
    InvalidDate {
        input: String,
    },

    #[error("Birth date {birth_date} is after the reference date {as_of}")]
    BirthDateInFuture {
        birth_date: NaiveDate,
        as_of: NaiveDate,
    },

    #[error("Invalid timezone '{0}': expected an IANA name such as Europe/Rome")]
    InvalidTimezone(String),
}

/// Parses an ISO calendar date (`YYYY-MM-DD`)
///
/// # Errors
///
/// Returns [`TemporalError::InvalidDate`] if the text is not a real calendar
/// date in the expected format.
pub fn parse_date(input: &str) -> Result<NaiveDate, TemporalError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| TemporalError::InvalidDate {
        input: input.to_string(),
    })
}

/// Calculates age in whole years at `as_of`
///
/// A birthday not yet reached in the reference year does not count. A person
/// born on 29 February turns a year older on 1 March in non-leap years.
///
/// # Errors
///
/// Returns [`TemporalError::BirthDateInFuture`] if `birth_date` is after `as_of`.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use core_kernel::calculate_age;
///
/// let birth = NaiveDate::from_ymd_opt(1990, 5, 15).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2025, 5, 14).unwrap();
/// assert_eq!(calculate_age(birth, as_of).unwrap(), 34);
/// ```
pub fn calculate_age(birth_date: NaiveDate, as_of: NaiveDate) -> Result<u32, TemporalError> {
    if birth_date > as_of {
        return Err(TemporalError::BirthDateInFuture { birth_date, as_of });
    }

    let mut years = as_of.year() - birth_date.year();
    if (as_of.month(), as_of.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }

    // birth_date <= as_of, so the truncated difference is never negative
    Ok(years.max(0) as u32)
}
