// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Fixed-schedule shift calendar.
//!
//! Each shift is a named window with a start and end time that repeats
//! every day. The middle boundary is the minute halfway through the
//! window; overnight windows wrap through midnight.

use async_trait::async_trait;
use chrono::{DateTime, Timelike, Utc};
use pulso_core::{ShiftMoment, TriggerTime};
use serde::{Deserialize, Serialize};

use super::{ShiftBoundary, ShiftCalendar, ShiftError};

/// One daily shift window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftWindow {
    pub name: String,
    pub start: TriggerTime,
    pub end: TriggerTime,
}

impl ShiftWindow {
    pub fn new(name: impl Into<String>, start: TriggerTime, end: TriggerTime) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Minute-of-day of the window midpoint, wrapping overnight windows.
    fn middle_minute(&self) -> u32 {
        let start = self.start.minute_of_day() as i64;
        let end = self.end.minute_of_day() as i64;
        let span = (end - start).rem_euclid(24 * 60);
        ((start + span / 2).rem_euclid(24 * 60)) as u32
    }

    fn moment_at(&self, minute_of_day: u32) -> Option<ShiftMoment> {
        if minute_of_day == self.start.minute_of_day() {
            Some(ShiftMoment::ShiftStart)
        } else if minute_of_day == self.middle_minute() {
            Some(ShiftMoment::ShiftMiddle)
        } else if minute_of_day == self.end.minute_of_day() {
            Some(ShiftMoment::ShiftEnd)
        } else {
            None
        }
    }
}

/// Shift calendar derived from a fixed set of daily windows.
#[derive(Debug, Clone, Default)]
pub struct FixedShiftCalendar {
    windows: Vec<ShiftWindow>,
}

impl FixedShiftCalendar {
    pub fn new(windows: Vec<ShiftWindow>) -> Self {
        Self { windows }
    }
}

#[async_trait]
impl ShiftCalendar for FixedShiftCalendar {
    async fn boundaries_at(&self, at: DateTime<Utc>) -> Result<Vec<ShiftBoundary>, ShiftError> {
        let minute_of_day = at.hour() * 60 + at.minute();
        Ok(self
            .windows
            .iter()
            .filter_map(|w| {
                w.moment_at(minute_of_day).map(|moment| ShiftBoundary {
                    shift: w.name.clone(),
                    moment,
                })
            })
            .collect())
    }
}
