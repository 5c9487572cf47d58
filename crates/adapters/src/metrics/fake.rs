// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Fake metric adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{MetricAdapter, MetricError};

/// Fake metric adapter for testing
#[derive(Clone, Default)]
pub struct FakeMetricAdapter {
    values: Arc<Mutex<HashMap<String, f64>>>,
    reads: Arc<Mutex<Vec<String>>>,
    fail: Arc<Mutex<bool>>,
}

impl FakeMetricAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, metric: &str, value: f64) {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(metric.to_string(), value);
    }

    pub fn remove(&self, metric: &str) {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(metric);
    }

    /// Metric names read so far, in order.
    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Make subsequent reads fail as unreachable.
    pub fn set_unreachable(&self, fail: bool) {
        *self.fail.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }
}

#[async_trait]
impl MetricAdapter for FakeMetricAdapter {
    async fn read(&self, metric: &str) -> Result<Option<f64>, MetricError> {
        self.reads
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(metric.to_string());
        if *self.fail.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(MetricError::Unreachable("injected".into()));
        }
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(metric).copied())
    }
}
