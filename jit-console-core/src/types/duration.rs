//! ISO 8601-like durations, as used by duration pickers and model payloads.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FormatError;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// `P[nD][T[nH][nM][nS]]`
static DURATION_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^P((\d+)D)?(T((\d+)H)?((\d+)M)?((\d+)S)?)?$").ok()
});

/// Common durations offered between a lower and upper bound, in seconds.
const RANGE_STEPS: [i64; 18] = [
    // minutes
    SECONDS_PER_MINUTE,
    2 * SECONDS_PER_MINUTE,
    5 * SECONDS_PER_MINUTE,
    10 * SECONDS_PER_MINUTE,
    15 * SECONDS_PER_MINUTE,
    30 * SECONDS_PER_MINUTE,
    // hours
    SECONDS_PER_HOUR,
    2 * SECONDS_PER_HOUR,
    3 * SECONDS_PER_HOUR,
    6 * SECONDS_PER_HOUR,
    12 * SECONDS_PER_HOUR,
    // days
    SECONDS_PER_DAY,
    7 * SECONDS_PER_DAY,
    30 * SECONDS_PER_DAY,
    60 * SECONDS_PER_DAY,
    90 * SECONDS_PER_DAY,
    180 * SECONDS_PER_DAY,
    365 * SECONDS_PER_DAY,
];

/// A span of days, hours, minutes and seconds.
///
/// Hours are folded into days on construction so that `hours` stays below
/// 24. Minutes and seconds are kept as given and are not carried over into
/// the next unit.
///
/// Seconds are fractional so that sub-second remainders produced by
/// [`Duration::from_seconds`] survive unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Duration {
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: f64,
}

impl Duration {
    /// Days saturate at the `i64` bounds when the folded hours overflow them.
    pub fn new(days: i64, hours: i64, minutes: i64, seconds: f64) -> Self {
        Self {
            days: days.saturating_add(hours / 24),
            hours: hours % 24,
            minutes,
            seconds,
        }
    }

    /// Like [`Duration::new`], but `None` if folding hours into days overflows.
    fn checked_new(days: i64, hours: i64, minutes: i64, seconds: f64) -> Option<Self> {
        Some(Self {
            days: days.checked_add(hours / 24)?,
            hours: hours % 24,
            minutes,
            seconds,
        })
    }

    /// Parse a `P{d}DT{h}H{m}M{s}S` string; every component is optional.
    #[allow(clippy::cast_precision_loss)]
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        let captures = DURATION_PATTERN
            .as_ref()
            .and_then(|re| re.captures(s))
            .ok_or_else(|| FormatError::new(s))?;

        let component = |index: usize| -> Result<i64, FormatError> {
            captures
                .get(index)
                .map_or(Ok(0), |m| m.as_str().parse().map_err(|_| FormatError::new(s)))
        };

        let seconds = component(9)? as f64;
        Self::checked_new(component(2)?, component(5)?, component(7)?, seconds)
            .ok_or_else(|| FormatError::new(s))
    }

    /// Split a total number of seconds into days, hours, minutes and seconds.
    ///
    /// Integral units are truncated toward zero and seconds keep the
    /// remainder, so a negative total yields components that are all zero
    /// or negative and still add up to the total.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_seconds(total_seconds: f64) -> Self {
        let day = SECONDS_PER_DAY as f64;
        let hour = SECONDS_PER_HOUR as f64;
        let minute = SECONDS_PER_MINUTE as f64;

        Self::new(
            (total_seconds / day).trunc() as i64,
            ((total_seconds % day) / hour).trunc() as i64,
            ((total_seconds % hour) / minute).trunc() as i64,
            total_seconds % minute,
        )
    }

    /// Time between now and a UNIX timestamp. Negative if `unix_time` is in the past.
    pub fn until_unix_time(unix_time: i64) -> Self {
        Self::until_unix_time_from(unix_time, Utc::now())
    }

    /// Time between `now` and a UNIX timestamp.
    #[allow(clippy::cast_precision_loss)]
    pub fn until_unix_time_from(unix_time: i64, now: DateTime<Utc>) -> Self {
        let now_seconds = now.timestamp_millis() as f64 / 1000.0;
        Self::from_seconds(unix_time as f64 - now_seconds)
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    pub fn hours(&self) -> i64 {
        self.hours
    }

    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Total number of seconds.
    ///
    /// Summed in floating point, so durations beyond the `i64` range of
    /// seconds lose precision instead of overflowing.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_seconds(&self) -> f64 {
        self.days as f64 * SECONDS_PER_DAY as f64
            + self.hours as f64 * SECONDS_PER_HOUR as f64
            + self.minutes as f64 * SECONDS_PER_MINUTE as f64
            + self.seconds
    }

    /// Human-readable form such as `30 days, 12 hours, 1 minute`.
    ///
    /// Zero units are skipped and seconds are never shown, so a duration of
    /// only seconds renders as an empty string.
    pub fn humanize(&self) -> String {
        [(self.days, "day"), (self.hours, "hour"), (self.minutes, "minute")]
            .into_iter()
            .filter(|(n, _)| *n > 0)
            .map(|(n, unit)| pluralize(n, unit))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Common durations between two bounds, including the bounds themselves.
    ///
    /// A `None` bound is unbounded and is left out of the result. Steps equal
    /// to a bound are excluded so that no value appears twice.
    pub fn range(min: Option<&Duration>, max: Option<&Duration>) -> Vec<Duration> {
        let min_seconds = min.map(Duration::to_seconds);
        let max_seconds = max.map(Duration::to_seconds);

        #[allow(clippy::cast_precision_loss)]
        let steps = RANGE_STEPS
            .iter()
            .map(|&s| s as f64)
            .filter(|&s| min_seconds.is_none_or(|m| s > m) && max_seconds.is_none_or(|m| s < m))
            .map(Duration::from_seconds);

        min.copied()
            .into_iter()
            .chain(steps)
            .chain(max.copied())
            .collect()
    }
}

fn pluralize(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P{}DT{}H{}M{}S",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

impl FromStr for Duration {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Duration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
