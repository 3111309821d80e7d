//! Prometheus-style durations (`5m`, `1h`, `30d`).
//!
//! Durations are stored as whole seconds and always render in the largest
//! unit that divides them exactly, so `"1h30m"` renders back as `"90m"`.

use crate::DurationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;

/// A duration expressed in Prometheus notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PromDuration(u64);

impl PromDuration {
    /// Create a duration from a number of seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub const fn from_minutes(minutes: u64) -> Self {
        Self(minutes * MINUTE)
    }

    pub const fn from_hours(hours: u64) -> Self {
        Self(hours * HOUR)
    }

    pub const fn from_days(days: u64) -> Self {
        Self(days * DAY)
    }

    /// Get the raw number of seconds.
    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Length in (possibly fractional) days.
    pub fn as_days(&self) -> f64 {
        self.0 as f64 / DAY as f64
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PromDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "0s");
        }
        for (unit, suffix) in [(DAY, "d"), (HOUR, "h"), (MINUTE, "m")] {
            if self.0 % unit == 0 {
                return write!(f, "{}{}", self.0 / unit, suffix);
            }
        }
        write!(f, "{}s", self.0)
    }
}

impl FromStr for PromDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(DurationError::Empty);
        }

        let mut total: u64 = 0;
        let mut digits = String::new();
        for ch in input.chars() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                continue;
            }
            let unit = match ch {
                's' => 1,
                'm' => MINUTE,
                'h' => HOUR,
                'd' => DAY,
                'w' => WEEK,
                other => return Err(DurationError::unknown_unit(input, other)),
            };
            if digits.is_empty() {
                return Err(DurationError::invalid(input));
            }
            let value: u64 = digits.parse().map_err(|_| DurationError::invalid(input))?;
            total = value
                .checked_mul(unit)
                .and_then(|v| total.checked_add(v))
                .ok_or_else(|| DurationError::invalid(input))?;
            digits.clear();
        }
        // A trailing number without unit is not a Prometheus duration.
        if !digits.is_empty() {
            return Err(DurationError::invalid(input));
        }

        Ok(Self(total))
    }
}

impl Serialize for PromDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PromDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
