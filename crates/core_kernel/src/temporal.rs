//! Time sources and timezone handling
//!
//! Settlement rules depend on "the current year" (vehicle age, default
//! registration year). That value is read through a [`Clock`] so callers can
//! pin it in tests and so the year boundary follows the jurisdiction's
//! timezone instead of the host's.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Timezone wrapper for policy jurisdictions
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

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name())
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Converts a UTC datetime to the local timezone
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// Calendar year of the given instant in this timezone
    pub fn year_of(&self, utc: DateTime<Utc>) -> i32 {
        self.to_local(utc).year()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid calendar year: {0}")]
    InvalidYear(i32),
}

/// Source of the current instant
pub trait Clock: Send + Sync {
    /// The current instant in UTC
    fn now(&self) -> DateTime<Utc>;

    /// The jurisdiction timezone used to derive calendar values
    fn timezone(&self) -> Timezone;

    /// The current calendar year in the clock's timezone
    fn current_year(&self) -> i32 {
        self.timezone().year_of(self.now())
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    timezone: Timezone,
}

impl SystemClock {
    pub fn new(timezone: Timezone) -> Self {
        Self { timezone }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn timezone(&self) -> Timezone {
        self.timezone
    }
}

/// A clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
    timezone: Timezone,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>, timezone: Timezone) -> Self {
        Self { instant, timezone }
    }

    /// A UTC clock fixed at noon on the first of July of the given year
    pub fn at_year(year: i32) -> Result<Self, TemporalError> {
        let instant = Utc
            .with_ymd_and_hms(year, 7, 1, 12, 0, 0)
            .single()
            .ok_or(TemporalError::InvalidYear(year))?;
        Ok(Self::new(instant, Timezone::default()))
    }

    /// The same instant read in another timezone
    pub fn with_timezone(self, timezone: Timezone) -> Self {
        Self { timezone, ..self }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn timezone(&self) -> Timezone {
        self.timezone
    }
}
