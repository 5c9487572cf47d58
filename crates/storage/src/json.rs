//! JSON file-backed execution store
//!
//! One pretty-printed document per execution under `<root>/executions/`.
//! A mutex shared by every clone of one open store serializes mutations,
//! which keeps the conditional insert and the compare-and-set atomic for
//! all engine handles in the process.

use crate::store::{CasOutcome, ExecutionStore, InsertOutcome, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use pulso_core::execution::{Execution, ExecutionId};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Execution store rooted at a state directory
#[derive(Clone)]
pub struct JsonExecutionStore {
    root: PathBuf,
    guard: Arc<Mutex<()>>,
}

impl JsonExecutionStore {
    /// Open or create a store under the given directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(root.join("executions"))?;
        Ok(Self {
            root,
            guard: Arc::new(Mutex::new(())),
        })
    }

    fn path_for(&self, id: &ExecutionId) -> PathBuf {
        self.root.join("executions").join(format!("{}.json", id))
    }

    fn write(&self, execution: &Execution) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(execution)?;
        fs::write(self.path_for(&execution.id), json)?;
        Ok(())
    }

    fn read(&self, path: &Path) -> Result<Option<Execution>, StoreError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Every readable execution; unreadable files are skipped with a warning
    fn read_all(&self) -> Result<Vec<Execution>, StoreError> {
        let dir = self.root.join("executions");
        let mut executions = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match fs::read_to_string(&path)
                .map_err(StoreError::from)
                .and_then(|content| Ok(serde_json::from_str::<Execution>(&content)?))
            {
                Ok(execution) => executions.push(execution),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable execution file");
                }
            }
        }
        executions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
        Ok(executions)
    }
}

#[async_trait]
impl ExecutionStore for JsonExecutionStore {
    async fn insert_if_vacant(
        &self,
        execution: Execution,
        window: Duration,
    ) -> Result<InsertOutcome, StoreError> {
        let _guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());

        let window_start = execution.created_at - window;
        let duplicate = self.read_all()?.into_iter().any(|existing| {
            existing.rule_id == execution.rule_id
                && existing.actor_id == execution.actor_id
                && existing.is_unresolved()
                && existing.created_at > window_start
        });
        if duplicate {
            return Ok(InsertOutcome::Duplicate);
        }

        self.write(&execution)?;
        Ok(InsertOutcome::Created)
    }

    async fn get(&self, id: &ExecutionId) -> Result<Option<Execution>, StoreError> {
        let _guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        self.read(&self.path_for(id))
    }

    async fn unresolved_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Execution>, StoreError> {
        let _guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| e.is_unresolved() && e.created_at <= cutoff)
            .collect())
    }

    async fn update_status(&self, execution: &Execution) -> Result<(), StoreError> {
        let _guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        if !self.path_for(&execution.id).exists() {
            return Err(StoreError::NotFound(execution.id.clone()));
        }
        self.write(execution)
    }

    async fn update_escalation(
        &self,
        execution: &Execution,
        prior_level: u32,
    ) -> Result<CasOutcome, StoreError> {
        let _guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        let Some(stored) = self.read(&self.path_for(&execution.id))? else {
            return Err(StoreError::NotFound(execution.id.clone()));
        };
        if stored.escalation_level != prior_level {
            return Ok(CasOutcome::Conflict);
        }
        self.write(execution)?;
        Ok(CasOutcome::Updated)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
