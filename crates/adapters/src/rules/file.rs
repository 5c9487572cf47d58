// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! TOML-backed rule store.
//!
//! Rules live in a single document with a `[[rules]]` table per rule.
//! The file is re-read on every call so edits take effect on the next
//! tick without a restart.

use std::path::PathBuf;

use async_trait::async_trait;
use pulso_core::Rule;
use serde::Deserialize;

use super::{RuleStore, RuleStoreError};

#[derive(Debug, Deserialize)]
struct RulesDoc {
    #[serde(default)]
    rules: Vec<Rule>,
}

/// Rule store backed by a TOML file on disk.
#[derive(Debug, Clone)]
pub struct TomlRuleStore {
    path: PathBuf,
}

impl TomlRuleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RuleStore for TomlRuleStore {
    async fn active_rules(&self) -> Result<Vec<Rule>, RuleStoreError> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| RuleStoreError::Unreachable(format!("{}: {}", self.path.display(), e)))?;
        let doc: RulesDoc =
            toml::from_str(&raw).map_err(|e| RuleStoreError::Malformed(e.to_string()))?;
        Ok(doc.rules.into_iter().filter(|r| r.active).collect())
    }
}
