// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Shift calendar port and its backends

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pulso_core::ShiftMoment;
use thiserror::Error;

mod fixed;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use fixed::{FixedShiftCalendar, ShiftWindow};

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeShiftCalendar;

/// Errors from consulting the shift calendar.
#[derive(Debug, Error)]
pub enum ShiftError {
    #[error("shift calendar unavailable: {0}")]
    Unavailable(String),
}

/// A named shift crossing one of its boundary moments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftBoundary {
    pub shift: String,
    pub moment: ShiftMoment,
}

/// Source of shift boundary crossings.
#[async_trait]
pub trait ShiftCalendar: Clone + Send + Sync + 'static {
    /// Boundaries that fall in the minute containing `at`.
    async fn boundaries_at(&self, at: DateTime<Utc>) -> Result<Vec<ShiftBoundary>, ShiftError>;
}
