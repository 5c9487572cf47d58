// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Error types for the engine tick

use pulso_adapters::rules::RuleStoreError;
use pulso_storage::StoreError;
use thiserror::Error;

/// Faults that abort a whole tick
///
/// Only the rule read and the unresolved sweep scan are fatal. A
/// failing metric source, directory, gateway, or single execution is
/// isolated to the unit it affects and logged.
#[derive(Debug, Error)]
pub enum TickError {
    #[error("rule store error: {0}")]
    Rules(#[from] RuleStoreError),
    #[error("execution store error: {0}")]
    Store(#[from] StoreError),
}
