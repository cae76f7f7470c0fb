//! Points in time received from the model as UNIX timestamps.

use std::fmt;

use chrono::{DateTime, Local, Utc};

use crate::error::FormatError;

/// A point in time, rendered in the local time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    date: DateTime<Utc>,
}

impl Instant {
    pub fn new(date: DateTime<Utc>) -> Self {
        Self { date }
    }

    /// Convert a UNIX timestamp (seconds) to an `Instant`.
    pub fn from_unix_time(unix_time: i64) -> Result<Self, FormatError> {
        DateTime::from_timestamp(unix_time, 0)
            .map(Self::new)
            .ok_or_else(|| FormatError::new(unix_time.to_string()))
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.date
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(date: DateTime<Utc>) -> Self {
        Self::new(date)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.with_timezone(&Local).format("%c"))
    }
}
