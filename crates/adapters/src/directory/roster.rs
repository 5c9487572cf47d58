// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! TOML roster directory.
//!
//! Staff and branches live in one document with a `[[branches]]` table
//! per branch and a `[[actors]]` table per staff member. The roster is
//! parsed fresh on every query; no cross-tick caching.

use std::path::PathBuf;

use async_trait::async_trait;
use pulso_core::{Actor, ActorId, BranchId, RoleName};
use serde::Deserialize;

use super::{eligible, DirectoryAdapter, DirectoryError};

#[derive(Debug, Deserialize)]
struct RosterDoc {
    #[serde(default)]
    branches: Vec<BranchEntry>,
    #[serde(default)]
    actors: Vec<ActorEntry>,
}

#[derive(Debug, Deserialize)]
struct BranchEntry {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ActorEntry {
    id: String,
    name: String,
    role: String,
    branch: String,
    #[serde(default = "default_active")]
    active: bool,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    branch_access: Vec<String>,
}

fn default_active() -> bool {
    true
}

/// Staff directory backed by a TOML roster file.
#[derive(Debug, Clone)]
pub struct RosterDirectory {
    path: PathBuf,
}

impl RosterDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Vec<Actor>, DirectoryError> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| DirectoryError::Unreachable(format!("{}: {}", self.path.display(), e)))?;
        let doc: RosterDoc =
            toml::from_str(&raw).map_err(|e| DirectoryError::Malformed(e.to_string()))?;

        let actors = doc
            .actors
            .into_iter()
            .map(|entry| {
                // An unknown branch id falls back to the id itself as the display name.
                let branch_name = doc
                    .branches
                    .iter()
                    .find(|b| b.id == entry.branch)
                    .map(|b| b.name.clone())
                    .unwrap_or_else(|| entry.branch.clone());
                Actor {
                    id: ActorId::from(entry.id),
                    name: entry.name,
                    role: RoleName::from(entry.role),
                    branch_id: BranchId::from(entry.branch),
                    branch_name,
                    active: entry.active,
                    phone: entry.phone,
                    email: entry.email,
                    branch_access: entry.branch_access.into_iter().map(BranchId::from).collect(),
                }
            })
            .collect();
        Ok(actors)
    }
}

#[async_trait]
impl DirectoryAdapter for RosterDirectory {
    async fn on_duty(
        &self,
        roles: &[RoleName],
        branch: Option<&BranchId>,
    ) -> Result<Vec<Actor>, DirectoryError> {
        let actors = self.load()?;
        Ok(eligible(&actors, roles, branch))
    }

    async fn get(&self, id: &ActorId) -> Result<Option<Actor>, DirectoryError> {
        let actors = self.load()?;
        Ok(actors.into_iter().find(|a| &a.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = r#"
        [[branches]]
        id = "suc-centro"
        name = "Sucursal Centro"

        [[branches]]
        id = "suc-norte"
        name = "Sucursal Norte"

        [[actors]]
        id = "emp-ana"
        name = "Ana"
        role = "cocinero"
        branch = "suc-centro"
        phone = "+5215512345678"

        [[actors]]
        id = "emp-beto"
        name = "Beto"
        role = "cocinero"
        branch = "suc-norte"

        [[actors]]
        id = "emp-carla"
        name = "Carla"
        role = "gerente_regional"
        branch = "suc-norte"
        branch_access = ["suc-centro"]
        email = "carla@pulso.mx"

        [[actors]]
        id = "emp-dante"
        name = "Dante"
        role = "cocinero"
        branch = "suc-centro"
        active = false
    "#;

    fn roster(dir: &tempfile::TempDir) -> RosterDirectory {
        let path = dir.path().join("roster.toml");
        std::fs::write(&path, ROSTER).unwrap();
        RosterDirectory::new(path)
    }

    #[tokio::test]
    async fn on_duty_filters_by_role_and_branch() {
        let dir = tempfile::tempdir().unwrap();
        let directory = roster(&dir);

        let cooks = directory
            .on_duty(&[RoleName::from("cocinero")], Some(&BranchId::from("suc-centro")))
            .await
            .unwrap();
        assert_eq!(cooks.len(), 1);
        assert_eq!(cooks[0].id.0, "emp-ana");
    }

    #[tokio::test]
    async fn on_duty_without_branch_spans_all_branches() {
        let dir = tempfile::tempdir().unwrap();
        let directory = roster(&dir);

        let cooks = directory
            .on_duty(&[RoleName::from("cocinero")], None)
            .await
            .unwrap();
        let ids: Vec<&str> = cooks.iter().map(|a| a.id.0.as_str()).collect();
        assert_eq!(ids, vec!["emp-ana", "emp-beto"]);
    }

    #[tokio::test]
    async fn branch_access_extends_coverage() {
        let dir = tempfile::tempdir().unwrap();
        let directory = roster(&dir);

        let managers = directory
            .on_duty(
                &[RoleName::from("gerente_regional")],
                Some(&BranchId::from("suc-centro")),
            )
            .await
            .unwrap();
        assert_eq!(managers.len(), 1);
        assert_eq!(managers[0].id.0, "emp-carla");
    }

    #[tokio::test]
    async fn inactive_staff_are_never_on_duty() {
        let dir = tempfile::tempdir().unwrap();
        let directory = roster(&dir);

        let cooks = directory
            .on_duty(&[RoleName::from("cocinero")], Some(&BranchId::from("suc-centro")))
            .await
            .unwrap();
        assert!(cooks.iter().all(|a| a.id.0 != "emp-dante"));
    }

    #[tokio::test]
    async fn branch_names_are_joined_from_the_roster() {
        let dir = tempfile::tempdir().unwrap();
        let directory = roster(&dir);

        let ana = directory.get(&ActorId::from("emp-ana")).await.unwrap().unwrap();
        assert_eq!(ana.branch_name, "Sucursal Centro");
    }

    #[tokio::test]
    async fn unknown_branch_falls_back_to_its_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");
        std::fs::write(
            &path,
            r#"
            [[actors]]
            id = "emp-eli"
            name = "Eli"
            role = "cocinero"
            branch = "suc-fantasma"
            "#,
        )
        .unwrap();
        let directory = RosterDirectory::new(path);

        let eli = directory.get(&ActorId::from("emp-eli")).await.unwrap().unwrap();
        assert_eq!(eli.branch_name, "suc-fantasma");
    }

    #[tokio::test]
    async fn get_finds_inactive_staff() {
        let dir = tempfile::tempdir().unwrap();
        let directory = roster(&dir);

        let dante = directory.get(&ActorId::from("emp-dante")).await.unwrap();
        assert!(dante.is_some());
        assert!(!dante.unwrap().active);
    }

    #[tokio::test]
    async fn missing_roster_is_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let directory = RosterDirectory::new(dir.path().join("nope.toml"));

        let err = directory.get(&ActorId::from("emp-ana")).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Unreachable(_)));
    }
}
