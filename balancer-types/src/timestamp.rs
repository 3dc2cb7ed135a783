//! UTC timestamps for `created`/`updated` columns.
//!
//! Timestamps are stored as RFC 3339 text with as many fractional digits as
//! needed, so a value read back compares equal to the value written. RFC 3339
//! only has four-digit years; values outside [`MIN_YEAR`]..=[`MAX_YEAR`] can
//! be held in memory but not stored.

use chrono::{DateTime, Datelike, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Day-first layout used by older control-plane payloads ("01-01-2012 11:22:33").
const LEGACY_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Earliest year with an RFC 3339 text form.
pub const MIN_YEAR: i32 = 0;

/// Latest year with an RFC 3339 text form.
pub const MAX_YEAR: i32 = 9999;

/// A point in time, always in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wraps an existing `chrono` value.
    #[must_use]
    pub const fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Builds a timestamp from calendar components. Years outside
    /// [`MIN_YEAR`]..=[`MAX_YEAR`] are rejected.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> Result<Self, Error> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .map(Self)
            .filter(Self::is_storable)
            .ok_or_else(|| {
                Error::InvalidTimestamp(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{min:02}:{sec:02}"
                ))
            })
    }

    /// Returns the underlying `chrono` value.
    #[must_use]
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Whether [`Timestamp::to_rfc3339`] output parses back to this value.
    #[must_use]
    pub fn is_storable(&self) -> bool {
        (MIN_YEAR..=MAX_YEAR).contains(&self.0.year())
    }

    /// Renders the column representation.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    /// Parses either RFC 3339 or the legacy `DD-MM-YYYY HH:MM:SS` layout.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(s, LEGACY_FORMAT)
            .map(|naive| Self(naive.and_utc()))
            .map_err(|e| Error::InvalidTimestamp(format!("{s:?}: {e}")))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
