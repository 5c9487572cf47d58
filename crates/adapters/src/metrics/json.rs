// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! JSON snapshot metric adapter.
//!
//! Metrics live in a flat JSON object mapping metric names to numbers,
//! refreshed by whatever writes the snapshot. The file is re-read on
//! every lookup so each tick sees the latest value.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{MetricAdapter, MetricError};

/// Metric adapter backed by a JSON snapshot file.
#[derive(Debug, Clone)]
pub struct JsonMetricAdapter {
    path: PathBuf,
}

impl JsonMetricAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MetricAdapter for JsonMetricAdapter {
    async fn read(&self, metric: &str) -> Result<Option<f64>, MetricError> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| MetricError::Unreachable(format!("{}: {}", self.path.display(), e)))?;
        let doc: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| MetricError::Malformed(e.to_string()))?;
        Ok(doc.get(metric).and_then(|v| v.as_f64()))
    }
}
