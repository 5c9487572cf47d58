// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Metric threshold conditions for event-based rules
//!
//! Conditions are a closed vocabulary: one named metric, one comparison
//! operator, one numeric threshold. There is no expression language.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator for metric thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        };
        write!(f, "{}", symbol)
    }
}

/// A threshold test against a named live metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCondition {
    pub metric: String,
    pub operator: CmpOp,
    pub threshold: f64,
}

impl MetricCondition {
    pub fn new(metric: impl Into<String>, operator: CmpOp, threshold: f64) -> Self {
        Self {
            metric: metric.into(),
            operator,
            threshold,
        }
    }

    /// Evaluate the condition against a live reading
    pub fn is_met(&self, value: f64) -> bool {
        match self.operator {
            CmpOp::Lt => value < self.threshold,
            CmpOp::Le => value <= self.threshold,
            CmpOp::Gt => value > self.threshold,
            CmpOp::Ge => value >= self.threshold,
        }
    }
}

impl fmt::Display for MetricCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.metric, self.operator, self.threshold)
    }
}
