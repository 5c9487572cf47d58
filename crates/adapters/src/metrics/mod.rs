// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Metric source port and its backends

use async_trait::async_trait;
use thiserror::Error;

mod json;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use json::JsonMetricAdapter;

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeMetricAdapter;

/// Errors from reading a metric.
#[derive(Debug, Error)]
pub enum MetricError {
    /// The metric source could not be read at all.
    #[error("metric source unreachable: {0}")]
    Unreachable(String),
    /// The source was read but did not parse.
    #[error("metric source malformed: {0}")]
    Malformed(String),
}

/// Source of current operational metric values.
#[async_trait]
pub trait MetricAdapter: Clone + Send + Sync + 'static {
    /// Current value of `metric`, or `None` if the source has no such metric.
    async fn read(&self, metric: &str) -> Result<Option<f64>, MetricError>;
}
