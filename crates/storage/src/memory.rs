// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! In-memory execution store
//!
//! The mutex spans the duplicate check and the insert, so conditional
//! operations are atomic for every handle cloned from the same store.

use crate::store::{CasOutcome, ExecutionStore, InsertOutcome, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use pulso_core::execution::{Execution, ExecutionId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Execution store backed by a shared map, for tests and dry runs
#[derive(Clone, Default)]
pub struct MemoryExecutionStore {
    executions: Arc<Mutex<HashMap<ExecutionId, Execution>>>,
}

impl MemoryExecutionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All executions ordered by creation time, for inspection in tests
    pub fn all(&self) -> Vec<Execution> {
        let map = self.executions.lock().unwrap_or_else(|e| e.into_inner());
        let mut executions: Vec<Execution> = map.values().cloned().collect();
        executions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
        executions
    }
}

#[async_trait]
impl ExecutionStore for MemoryExecutionStore {
    async fn insert_if_vacant(
        &self,
        execution: Execution,
        window: Duration,
    ) -> Result<InsertOutcome, StoreError> {
        let mut map = self.executions.lock().unwrap_or_else(|e| e.into_inner());

        let window_start = execution.created_at - window;
        let duplicate = map.values().any(|existing| {
            existing.rule_id == execution.rule_id
                && existing.actor_id == execution.actor_id
                && existing.is_unresolved()
                && existing.created_at > window_start
        });
        if duplicate {
            return Ok(InsertOutcome::Duplicate);
        }

        map.insert(execution.id.clone(), execution);
        Ok(InsertOutcome::Created)
    }

    async fn get(&self, id: &ExecutionId) -> Result<Option<Execution>, StoreError> {
        let map = self.executions.lock().unwrap_or_else(|e| e.into_inner());
        Ok(map.get(id).cloned())
    }

    async fn unresolved_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Execution>, StoreError> {
        let map = self.executions.lock().unwrap_or_else(|e| e.into_inner());
        let mut due: Vec<Execution> = map
            .values()
            .filter(|e| e.is_unresolved() && e.created_at <= cutoff)
            .cloned()
            .collect();
        due.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
        Ok(due)
    }

    async fn update_status(&self, execution: &Execution) -> Result<(), StoreError> {
        let mut map = self.executions.lock().unwrap_or_else(|e| e.into_inner());
        if !map.contains_key(&execution.id) {
            return Err(StoreError::NotFound(execution.id.clone()));
        }
        map.insert(execution.id.clone(), execution.clone());
        Ok(())
    }

    async fn update_escalation(
        &self,
        execution: &Execution,
        prior_level: u32,
    ) -> Result<CasOutcome, StoreError> {
        let mut map = self.executions.lock().unwrap_or_else(|e| e.into_inner());
        let Some(stored) = map.get_mut(&execution.id) else {
            return Err(StoreError::NotFound(execution.id.clone()));
        };
        if stored.escalation_level != prior_level {
            return Ok(CasOutcome::Conflict);
        }
        *stored = execution.clone();
        Ok(CasOutcome::Updated)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
