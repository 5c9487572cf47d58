// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pulso Labs

//! Actors: employees and supervisory staff resolved from the roster

use crate::escalation::Channel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique actor identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub String);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ActorId {
    fn from(s: String) -> Self {
        ActorId(s)
    }
}

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        ActorId(s.to_string())
    }
}

/// Unique branch identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchId(pub String);

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BranchId {
    fn from(s: String) -> Self {
        BranchId(s)
    }
}

impl From<&str> for BranchId {
    fn from(s: &str) -> Self {
        BranchId(s.to_string())
    }
}

/// A role name as it appears in rules and escalation policies
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleName(pub String);

/// Pseudo-role that resolves to the execution's own assignee instead of
/// a roster query
pub const ASSIGNEE_ROLE: &str = "empleado_asignado";

impl RoleName {
    pub fn is_assignee(&self) -> bool {
        self.0 == ASSIGNEE_ROLE
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RoleName {
    fn from(s: String) -> Self {
        RoleName(s)
    }
}

impl From<&str> for RoleName {
    fn from(s: &str) -> Self {
        RoleName(s.to_string())
    }
}

/// An employee or staff member able to receive SOP work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub role: RoleName,
    pub branch_id: BranchId,
    /// Display name of the home branch; falls back to the branch id
    pub branch_name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Branches this actor may supervise in addition to their own
    #[serde(default)]
    pub branch_access: Vec<BranchId>,
}

fn default_active() -> bool {
    true
}

impl Actor {
    pub fn new(
        id: impl Into<ActorId>,
        name: impl Into<String>,
        role: impl Into<RoleName>,
        branch_id: impl Into<BranchId>,
    ) -> Self {
        let branch_id = branch_id.into();
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
            branch_name: branch_id.0.clone(),
            branch_id,
            active: true,
            phone: None,
            email: None,
            branch_access: Vec::new(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_branch_name(mut self, name: impl Into<String>) -> Self {
        self.branch_name = name.into();
        self
    }

    pub fn with_branch_access(mut self, branches: Vec<BranchId>) -> Self {
        self.branch_access = branches;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Delivery address for a channel, if the actor has one on file
    pub fn address_for(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::Whatsapp | Channel::Sms | Channel::Phone => self.phone.as_deref(),
            Channel::Email => self.email.as_deref(),
        }
    }

    /// Whether this actor works at or supervises the given branch
    pub fn covers_branch(&self, branch: &BranchId) -> bool {
        self.branch_id == *branch || self.branch_access.contains(branch)
    }
}
