// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Wall-clock trigger matching: weekdays and minute-of-day times
//!
//! Rules gate on the tick's exact minute; a tick at 11:01 does not match
//! a trigger at 11:00. The external scheduler is expected to tick at
//! least once per minute.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Days of the week, serialized with the roster's Spanish names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Domingo,
    Lunes,
    Martes,
    #[serde(rename = "miércoles", alias = "miercoles")]
    Miercoles,
    Jueves,
    Viernes,
    #[serde(rename = "sábado", alias = "sabado")]
    Sabado,
}

impl Weekday {
    /// Weekday of a wall-clock instant
    pub fn from_datetime(t: &DateTime<Utc>) -> Self {
        match t.weekday() {
            chrono::Weekday::Sun => Weekday::Domingo,
            chrono::Weekday::Mon => Weekday::Lunes,
            chrono::Weekday::Tue => Weekday::Martes,
            chrono::Weekday::Wed => Weekday::Miercoles,
            chrono::Weekday::Thu => Weekday::Jueves,
            chrono::Weekday::Fri => Weekday::Viernes,
            chrono::Weekday::Sat => Weekday::Sabado,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Domingo => "domingo",
            Weekday::Lunes => "lunes",
            Weekday::Martes => "martes",
            Weekday::Miercoles => "miércoles",
            Weekday::Jueves => "jueves",
            Weekday::Viernes => "viernes",
            Weekday::Sabado => "sábado",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A minute-granularity time of day ("HH:MM")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TriggerTime {
    hour: u8,
    minute: u8,
}

impl TriggerTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, TimeParseError> {
        if hour > 23 || minute > 59 {
            return Err(TimeParseError::OutOfRange(format!(
                "{:02}:{:02}",
                hour, minute
            )));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight
    pub fn minute_of_day(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// True when the instant's wall-clock minute equals this time
    pub fn matches(&self, t: &DateTime<Utc>) -> bool {
        t.hour() == self.hour as u32 && t.minute() == self.minute as u32
    }
}

impl fmt::Display for TriggerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TriggerTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s
            .split_once(':')
            .ok_or_else(|| TimeParseError::Malformed(s.to_string()))?;
        let hour: u8 = hour
            .parse()
            .map_err(|_| TimeParseError::Malformed(s.to_string()))?;
        let minute: u8 = minute
            .parse()
            .map_err(|_| TimeParseError::Malformed(s.to_string()))?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for TriggerTime {
    type Error = TimeParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TriggerTime> for String {
    fn from(t: TriggerTime) -> Self {
        t.to_string()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("invalid trigger time {0:?}, expected HH:MM")]
    Malformed(String),
    #[error("trigger time out of range: {0}")]
    OutOfRange(String),
}
