// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Execution store port

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use pulso_core::execution::{Execution, ExecutionId};
use thiserror::Error;

/// Errors from execution store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("execution not found: {0}")]
    NotFound(ExecutionId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result of a conditional insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The execution was stored
    Created,
    /// An unresolved execution for the same rule and actor already
    /// exists inside the window; nothing was written
    Duplicate,
}

/// Result of a compare-and-set escalation update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    Updated,
    /// The stored level no longer matches the level that was read;
    /// another tick escalated first
    Conflict,
}

/// Persistence port for SOP executions
///
/// The duplicate check in `insert_if_vacant` and the level check in
/// `update_escalation` are atomic with the write. Overlapping ticks
/// race through these two operations and converge.
#[async_trait]
pub trait ExecutionStore: Clone + Send + Sync + 'static {
    /// Insert unless an unresolved execution for the same rule and actor
    /// was created within `window` before this one
    async fn insert_if_vacant(
        &self,
        execution: Execution,
        window: Duration,
    ) -> Result<InsertOutcome, StoreError>;

    /// Look up one execution by id
    async fn get(&self, id: &ExecutionId) -> Result<Option<Execution>, StoreError>;

    /// Unresolved executions created at or before the cutoff, oldest first
    async fn unresolved_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Execution>, StoreError>;

    /// Persist a status change unconditionally
    async fn update_status(&self, execution: &Execution) -> Result<(), StoreError>;

    /// Persist an escalation only if the stored level still equals
    /// `prior_level`
    async fn update_escalation(
        &self,
        execution: &Execution,
        prior_level: u32,
    ) -> Result<CasOutcome, StoreError>;
}
