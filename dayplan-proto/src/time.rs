//! Minute-of-day time values.
//!
//! A [`MinuteOfDay`] is an offset in minutes from midnight. The valid range is
//! `[0, 1440]`; the upper bound (`24:00`) only makes sense as the end of an
//! interval. There are no dates, time zones, or DST here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::task::TaskError;

/// Number of minutes in a day, also the largest valid [`MinuteOfDay`].
pub const MINUTES_PER_DAY: u16 = 1440;

/// A point on the day's timeline, in minutes since midnight.
///
/// Serialized in its `HH:MM` text form so config files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Midnight at the start of the day (`00:00`).
    pub const MIDNIGHT: Self = Self(0);

    /// Midnight at the end of the day (`24:00`).
    pub const END_OF_DAY: Self = Self(MINUTES_PER_DAY);

    /// Creates a minute-of-day value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::MinuteOutOfRange`] if `minute` exceeds 1440.
    pub fn new(minute: u16) -> Result<Self, TaskError> {
        if minute > MINUTES_PER_DAY {
            return Err(TaskError::MinuteOutOfRange(minute));
        }
        Ok(Self(minute))
    }

    /// Creates a minute-of-day value from an hour and minute pair.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::MalformedTime`] if `minutes` is 60 or more, or
    /// if the result lands past `24:00`.
    pub fn from_hm(hours: u16, minutes: u16) -> Result<Self, TaskError> {
        if minutes >= 60 {
            return Err(TaskError::MalformedTime(format!("{hours}:{minutes:02}")));
        }
        hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes))
            .filter(|m| *m <= MINUTES_PER_DAY)
            .map(Self)
            .ok_or_else(|| TaskError::MalformedTime(format!("{hours:02}:{minutes:02}")))
    }

    /// Returns the raw minute offset.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Hour component (`0..=24`).
    #[must_use]
    pub const fn hours(self) -> u16 {
        self.0 / 60
    }

    /// Minute-within-hour component (`0..60`).
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

impl FromStr for MinuteOfDay {
    type Err = TaskError;

    /// Parses `H:MM` or `HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TaskError::MalformedTime(s.to_string());
        let (hours, minutes) = s.trim().split_once(':').ok_or_else(malformed)?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !(1..=2).contains(&hours.len()) || minutes.len() != 2 {
            return Err(malformed());
        }
        if !all_digits(hours) || !all_digits(minutes) {
            return Err(malformed());
        }
        let hours: u16 = hours.parse().map_err(|_| malformed())?;
        let minutes: u16 = minutes.parse().map_err(|_| malformed())?;
        Self::from_hm(hours, minutes).map_err(|_| malformed())
    }
}

impl TryFrom<u16> for MinuteOfDay {
    type Error = TaskError;

    fn try_from(minute: u16) -> Result<Self, Self::Error> {
        Self::new(minute)
    }
}

impl TryFrom<String> for MinuteOfDay {
    type Error = TaskError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<MinuteOfDay> for String {
    fn from(m: MinuteOfDay) -> Self {
        m.to_string()
    }
}

impl From<MinuteOfDay> for u16 {
    fn from(m: MinuteOfDay) -> Self {
        m.0
    }
}
