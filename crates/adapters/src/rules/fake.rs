// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Fake rule store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pulso_core::Rule;

use super::{RuleStore, RuleStoreError};

/// Fake rule store for testing
#[derive(Clone, Default)]
pub struct FakeRuleStore {
    rules: Arc<Mutex<Vec<Rule>>>,
    fail: Arc<Mutex<bool>>,
}

impl FakeRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self {
            rules: Arc::new(Mutex::new(rules)),
            fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Replace the rule set returned on the next read.
    pub fn set_rules(&self, rules: Vec<Rule>) {
        *self.rules.lock().unwrap_or_else(|e| e.into_inner()) = rules;
    }

    /// Make subsequent reads fail as unreachable.
    pub fn set_unreachable(&self, fail: bool) {
        *self.fail.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }
}

#[async_trait]
impl RuleStore for FakeRuleStore {
    async fn active_rules(&self) -> Result<Vec<Rule>, RuleStoreError> {
        if *self.fail.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(RuleStoreError::Unreachable("injected".into()));
        }
        let rules = self.rules.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rules.iter().filter(|r| r.active).cloned().collect())
    }
}
