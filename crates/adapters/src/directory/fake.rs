// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Fake staff directory for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pulso_core::{Actor, ActorId, BranchId, RoleName};

use super::{eligible, DirectoryAdapter, DirectoryError};

/// Fake staff directory for testing
#[derive(Clone, Default)]
pub struct FakeDirectory {
    actors: Arc<Mutex<Vec<Actor>>>,
    fail: Arc<Mutex<bool>>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actors(actors: Vec<Actor>) -> Self {
        Self {
            actors: Arc::new(Mutex::new(actors)),
            fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn add(&self, actor: Actor) {
        self.actors
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(actor);
    }

    /// Make subsequent queries fail as unreachable.
    pub fn set_unreachable(&self, fail: bool) {
        *self.fail.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    fn check(&self) -> Result<(), DirectoryError> {
        if *self.fail.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(DirectoryError::Unreachable("injected".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryAdapter for FakeDirectory {
    async fn on_duty(
        &self,
        roles: &[RoleName],
        branch: Option<&BranchId>,
    ) -> Result<Vec<Actor>, DirectoryError> {
        self.check()?;
        let actors = self.actors.lock().unwrap_or_else(|e| e.into_inner());
        Ok(eligible(&actors, roles, branch))
    }

    async fn get(&self, id: &ActorId) -> Result<Option<Actor>, DirectoryError> {
        self.check()?;
        let actors = self.actors.lock().unwrap_or_else(|e| e.into_inner());
        Ok(actors.iter().find(|a| &a.id == id).cloned())
    }
}
