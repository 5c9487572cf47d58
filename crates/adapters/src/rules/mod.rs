// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Rule store port and its backends

use async_trait::async_trait;
use pulso_core::Rule;
use thiserror::Error;

mod file;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use file::TomlRuleStore;

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeRuleStore;

/// Errors from reading the rule store.
#[derive(Debug, Error)]
pub enum RuleStoreError {
    /// The backing document could not be read at all.
    #[error("rule store unreachable: {0}")]
    Unreachable(String),
    /// The document was read but did not parse as a rule set.
    #[error("rule store malformed: {0}")]
    Malformed(String),
}

/// Source of automation rules.
#[async_trait]
pub trait RuleStore: Clone + Send + Sync + 'static {
    /// All rules with `active = true`, in document order.
    async fn active_rules(&self) -> Result<Vec<Rule>, RuleStoreError>;
}
