//! Wall-clock time of day.
//!
//! Schedules are planned on a single day, so a time is stored as minutes
//! since midnight. The zero-padded `"HH:MM"` form only exists at the serde
//! boundary; ordering and arithmetic always use the integer.

use crate::error::ValidationError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const MINUTES_PER_HOUR: u16 = 60;
const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

/// A time of day with minute resolution, always within `00:00..=23:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Build a time from an hour and minute.
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour >= 24 || minute >= 60 {
            return Err(ValidationError::InvalidValue {
                field: "time".to_string(),
                reason: format!("{}:{:02} is not a valid time of day", hour, minute),
            });
        }
        Ok(Self(hour as u16 * MINUTES_PER_HOUR + minute as u16))
    }

    /// Build a time on the hour, `None` when the hour falls outside the day.
    pub fn from_hour(hour: u32) -> Option<Self> {
        if hour < 24 {
            Some(Self(hour as u16 * MINUTES_PER_HOUR))
        } else {
            None
        }
    }

    /// Build a time from minutes since midnight.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes < MINUTES_PER_DAY as u32 {
            Some(Self(minutes as u16))
        } else {
            None
        }
    }

    /// Constructor for known-good constants.
    ///
    /// # Panics
    ///
    /// Panics if `hour >= 24` or `minute >= 60`; in a const context this
    /// fails compilation instead.
    pub const fn at(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60, "clock time out of range");
        Self(hour * MINUTES_PER_HOUR + minute)
    }

    pub fn hour(self) -> u8 {
        (self.0 / MINUTES_PER_HOUR) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % MINUTES_PER_HOUR) as u8
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(self) -> u32 {
        self.0 as u32
    }

    /// Advance by whole hours, `None` if the result would leave the day.
    pub fn checked_add_hours(self, hours: u32) -> Option<Self> {
        let minutes = self.0 as u32 + hours.checked_mul(MINUTES_PER_HOUR as u32)?;
        Self::from_minutes(minutes)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidFormat {
            field: "time".to_string(),
            expected: "HH:MM".to_string(),
            got: s.to_string(),
        };

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_display_parse_round_trip(minutes in 0u32..1440) {
            let t = ClockTime::from_minutes(minutes).ok_or_else(|| TestCaseError::fail("in range"))?;
            let parsed: ClockTime = t.to_string().parse().map_err(|e| TestCaseError::fail(format!("{e}")))?;
            prop_assert_eq!(parsed, t);
        }

        #[test]
        fn prop_lexicographic_order_matches_numeric(a in 0u32..1440, b in 0u32..1440) {
            let ta = ClockTime::from_minutes(a).ok_or_else(|| TestCaseError::fail("in range"))?;
            let tb = ClockTime::from_minutes(b).ok_or_else(|| TestCaseError::fail("in range"))?;
            prop_assert_eq!(ta.cmp(&tb), ta.to_string().cmp(&tb.to_string()));
        }
    }
}
