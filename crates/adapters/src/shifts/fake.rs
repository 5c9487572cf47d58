// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Fake shift calendar for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{ShiftBoundary, ShiftCalendar, ShiftError};

/// Fake shift calendar for testing
#[derive(Clone, Default)]
pub struct FakeShiftCalendar {
    boundaries: Arc<Mutex<Vec<ShiftBoundary>>>,
}

impl FakeShiftCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report these boundaries on every query until changed.
    pub fn set_boundaries(&self, boundaries: Vec<ShiftBoundary>) {
        *self.boundaries.lock().unwrap_or_else(|e| e.into_inner()) = boundaries;
    }

    pub fn clear(&self) {
        self.boundaries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[async_trait]
impl ShiftCalendar for FakeShiftCalendar {
    async fn boundaries_at(&self, _at: DateTime<Utc>) -> Result<Vec<ShiftBoundary>, ShiftError> {
        Ok(self
            .boundaries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }
}
