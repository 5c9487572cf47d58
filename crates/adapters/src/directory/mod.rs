// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Staff directory port and its backends

use async_trait::async_trait;
use pulso_core::{Actor, ActorId, BranchId, RoleName};
use thiserror::Error;

mod roster;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use roster::RosterDirectory;

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeDirectory;

/// Errors from querying the staff directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The backing roster could not be read at all.
    #[error("directory unreachable: {0}")]
    Unreachable(String),
    /// The roster was read but did not parse.
    #[error("directory malformed: {0}")]
    Malformed(String),
}

/// Source of staff assignments.
#[async_trait]
pub trait DirectoryAdapter: Clone + Send + Sync + 'static {
    /// Active staff holding any of `roles`, optionally narrowed to one branch.
    async fn on_duty(
        &self,
        roles: &[RoleName],
        branch: Option<&BranchId>,
    ) -> Result<Vec<Actor>, DirectoryError>;

    /// Look up a single staff member by id, active or not.
    async fn get(&self, id: &ActorId) -> Result<Option<Actor>, DirectoryError>;
}

/// Shared on-duty filter: active, holds one of the roles, covers the branch.
pub(crate) fn eligible(actors: &[Actor], roles: &[RoleName], branch: Option<&BranchId>) -> Vec<Actor> {
    actors
        .iter()
        .filter(|a| a.active)
        .filter(|a| roles.contains(&a.role))
        .filter(|a| branch.map(|b| a.covers_branch(b)).unwrap_or(true))
        .cloned()
        .collect()
}
